//! Page tables of the processes currently holding frames.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::physical::PageFrame;
use crate::ProcessId;

bitflags! {
    pub struct Flags : u8 {
        /// The page is resident in the frame the entry points to.
        const VALID = 0b00000001;
    }
}

/// Maps one page of a process to the frame holding it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageTableEntry {
    page: usize,
    frame: PageFrame,
    flags: Flags,
}

impl PageTableEntry {
    pub fn new(page: usize, frame: PageFrame) -> Self {
        PageTableEntry {
            page,
            frame,
            flags: Flags::VALID,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn frame(&self) -> PageFrame {
        self.frame
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Every page of an admitted process stays resident, so this holds for all entries.
    pub fn is_valid(&self) -> bool {
        self.flags.contains(Flags::VALID)
    }
}

/// Page table of a single process, ordered by page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    /// Build a table mapping page `i` to the `i`-th frame of `frames`.
    pub fn from_frames<I>(frames: I) -> PageTable
    where
        I: IntoIterator<Item = PageFrame>,
    {
        let entries = frames
            .into_iter()
            .enumerate()
            .map(|(page, frame)| PageTableEntry::new(page, frame))
            .collect();
        PageTable { entries }
    }

    pub fn entries(&self) -> &[PageTableEntry] {
        &self.entries
    }

    /// Number of mapped pages.
    pub fn page_count(&self) -> usize {
        self.entries.len()
    }

    /// Frame holding the given page, if the page is mapped.
    pub fn resolve(&self, page: usize) -> Option<PageFrame> {
        self.entries.get(page).filter(|e| e.is_valid()).map(|e| e.frame())
    }
}

/// The page tables of all processes that currently hold frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTableStore {
    tables: BTreeMap<ProcessId, PageTable>,
}

impl PageTableStore {
    pub fn new() -> Self {
        PageTableStore {
            tables: BTreeMap::new(),
        }
    }

    pub fn get(&self, owner: &ProcessId) -> Option<&PageTable> {
        self.tables.get(owner)
    }

    pub fn contains(&self, owner: &ProcessId) -> bool {
        self.tables.contains_key(owner)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProcessId, &PageTable)> {
        self.tables.iter()
    }

    /// Publish the table of `owner`, which must not have one yet.
    pub(crate) fn insert(&mut self, owner: ProcessId, table: PageTable) -> &PageTable {
        debug_assert!(!self.tables.contains_key(&owner), "{} already has a page table", owner);
        self.tables.entry(owner).or_insert(table)
    }

    pub(crate) fn remove(&mut self, owner: &ProcessId) -> Option<PageTable> {
        self.tables.remove(owner)
    }

    pub(crate) fn clear(&mut self) {
        self.tables.clear();
    }
}
