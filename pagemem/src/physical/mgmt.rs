//! Bookkeeping for the page frames of a pool.

use alloc::vec::Vec;

use crate::physical::{Frame, PageFrame};
use crate::ProcessId;

/// One entry per page frame, recording who holds it.
pub struct PageFrameTable {
    entries: Vec<PageFrameInfo>,
}

impl PageFrameTable {
    /// Create a table of `num_page_frames` frames, all of them free.
    pub fn new(num_page_frames: usize) -> PageFrameTable {
        let entries = (0..num_page_frames)
            .map(|_| PageFrameInfo { state: PageFrameState::Free })
            .collect();
        PageFrameTable { entries }
    }

    pub fn length(&self) -> usize {
        self.entries.len()
    }

    pub fn index(&self, idx: usize) -> &PageFrameInfo {
        assert!(idx < self.entries.len(), "frame {} out of bounds", idx);
        &self.entries[idx]
    }

    pub fn index_mut(&mut self, idx: usize) -> &mut PageFrameInfo {
        assert!(idx < self.entries.len(), "frame {} out of bounds", idx);
        &mut self.entries[idx]
    }

    /// Release every frame held by `owner`. Returns how many frames were released.
    pub fn release_owned(&mut self, owner: &ProcessId) -> usize {
        let mut released = 0;
        for entry in self.entries.iter_mut().filter(|e| e.owner() == Some(owner)) {
            entry.state = PageFrameState::Free;
            released += 1;
        }
        released
    }

    /// Mark every frame as free again.
    pub fn release_all(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.state = PageFrameState::Free;
        }
    }

    /// Frames currently held by `owner`, in ascending order.
    pub fn owned_by<'a>(&'a self, owner: &'a ProcessId) -> impl Iterator<Item = PageFrame> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.owner() == Some(owner))
            .map(|(i, _)| PageFrame(i))
    }

    /// Snapshot of all frames in ascending order.
    pub fn frames(&self) -> Vec<Frame> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| Frame::new(PageFrame(i), e.owner().cloned()))
            .collect()
    }

    pub fn stats(&self) -> PageFrameStats {
        let allocated = self.entries.iter().filter(|e| e.is_allocated()).count();
        PageFrameStats {
            total_count: self.entries.len(),
            allocated_count: allocated,
        }
    }
}

/// Statistics about the page frame table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFrameStats {
    pub total_count: usize,
    pub allocated_count: usize,
}

impl PageFrameStats {
    pub fn free_count(&self) -> usize {
        self.total_count - self.allocated_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFrameState {
    Free,
    Allocated(ProcessId),
}

#[derive(Debug, Clone)]
pub struct PageFrameInfo {
    pub state: PageFrameState,
}

impl PageFrameInfo {
    pub fn is_allocated(&self) -> bool {
        self.state != PageFrameState::Free
    }

    pub fn owner(&self) -> Option<&ProcessId> {
        match self.state {
            PageFrameState::Allocated(ref owner) => Some(owner),
            PageFrameState::Free => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{PageFrameState, PageFrameTable};
    use crate::physical::PageFrame;
    use crate::ProcessId;

    fn claim(table: &mut PageFrameTable, idx: usize, owner: &str) {
        table.index_mut(idx).state = PageFrameState::Allocated(ProcessId::from(owner));
    }

    #[test]
    fn test_new_table_is_free() {
        let table = PageFrameTable::new(6);
        assert_eq!(table.length(), 6);
        let stats = table.stats();
        assert_eq!(stats.total_count, 6);
        assert_eq!(stats.allocated_count, 0);
        assert_eq!(stats.free_count(), 6);
        assert!(table.frames().iter().all(|f| !f.is_occupied()));
    }

    #[test]
    fn test_release_owned_only_touches_owner() {
        let mut table = PageFrameTable::new(5);
        claim(&mut table, 0, "A");
        claim(&mut table, 2, "B");
        claim(&mut table, 3, "A");

        let a = ProcessId::from("A");
        let owned: Vec<_> = table.owned_by(&a).collect();
        assert_eq!(owned, vec![PageFrame(0), PageFrame(3)]);

        assert_eq!(table.release_owned(&a), 2);
        assert_eq!(table.release_owned(&a), 0);
        assert_eq!(table.stats().allocated_count, 1);
        assert_eq!(table.index(2).owner().map(|p| p.as_str()), Some("B"));
    }

    #[test]
    fn test_release_all() {
        let mut table = PageFrameTable::new(4);
        claim(&mut table, 1, "A");
        claim(&mut table, 2, "B");
        table.release_all();
        assert_eq!(table.stats().allocated_count, 0);
    }
}
