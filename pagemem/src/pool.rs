//! The frame pool: a fixed number of frames handed out to processes first-fit,
//! together with the page tables describing who holds what.
//!
//! Allocation is all-or-nothing. A page table exists for a process exactly while it
//! holds frames; both appear in one call to `allocate` and vanish in one call to
//! `deallocate`.

use alloc::vec::Vec;
use core::fmt;

use crate::paging::{PageTable, PageTableStore};
use crate::physical::alloc::{FirstFitAllocator, PageFrameAllocator};
use crate::physical::mgmt::{PageFrameStats, PageFrameTable};
use crate::physical::Frame;
use crate::{ProcessId, MAX_FRAME_COUNT, MIN_FRAME_COUNT};

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum ConfigureError {
    /// The frame count lies outside of `MIN_FRAME_COUNT..=MAX_FRAME_COUNT`.
    InvalidFrameCount(usize),
    /// Some process still holds frames of the current configuration.
    AllocationsOutstanding,
}

impl fmt::Display for ConfigureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigureError::InvalidFrameCount(_) => write!(
                f,
                "Memory size must be between {} and {} frames.",
                MIN_FRAME_COUNT, MAX_FRAME_COUNT
            ),
            ConfigureError::AllocationsOutstanding => {
                f.write_str("Memory cannot be reconfigured while frames are allocated.")
            }
        }
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum AllocError {
    /// The pool has not been configured yet.
    NotConfigured,
    /// A request for zero pages.
    EmptyRequest,
    /// The process already holds frames.
    AlreadyAllocated,
    /// Not enough free frames; nothing was allocated.
    OutOfFrames { requested: usize, available: usize },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AllocError::NotConfigured => f.write_str("memory is not configured"),
            AllocError::EmptyRequest => f.write_str("no pages requested"),
            AllocError::AlreadyAllocated => f.write_str("process already holds frames"),
            AllocError::OutOfFrames { requested, available } => {
                write!(f, "needs {}, available {}", requested, available)
            }
        }
    }
}

#[derive(Default)]
pub struct FramePool {
    /// `None` until the pool is configured.
    allocator: Option<FirstFitAllocator>,
    page_tables: PageTableStore,
}

impl FramePool {
    /// An unconfigured pool without any frames.
    pub fn new() -> FramePool {
        FramePool {
            allocator: None,
            page_tables: PageTableStore::new(),
        }
    }

    /// (Re)create the pool with `frame_count` free frames.
    pub fn configure(&mut self, frame_count: usize) -> Result<(), ConfigureError> {
        if frame_count < MIN_FRAME_COUNT || frame_count > MAX_FRAME_COUNT {
            return Err(ConfigureError::InvalidFrameCount(frame_count));
        }
        if !self.page_tables.is_empty() {
            return Err(ConfigureError::AllocationsOutstanding);
        }
        debug!("[pagemem] configuring {} frames", frame_count);
        self.allocator = Some(FirstFitAllocator::new(PageFrameTable::new(frame_count)));
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.allocator.is_some()
    }

    /// Number of frames in the pool, zero if unconfigured.
    pub fn frame_count(&self) -> usize {
        self.allocator
            .as_ref()
            .map_or(0, |a| a.page_frame_table().length())
    }

    pub fn free_frame_count(&self) -> usize {
        self.allocator.as_ref().map_or(0, |a| a.free_count())
    }

    pub fn stats(&self) -> Option<PageFrameStats> {
        self.allocator.as_ref().map(|a| a.page_frame_table().stats())
    }

    /// Snapshot of all frames in ascending order. Empty if unconfigured.
    pub fn frames(&self) -> Vec<Frame> {
        self.allocator
            .as_ref()
            .map(|a| a.page_frame_table().frames())
            .unwrap_or_default()
    }

    pub fn page_tables(&self) -> &PageTableStore {
        &self.page_tables
    }

    pub fn page_table(&self, owner: &ProcessId) -> Option<&PageTable> {
        self.page_tables.get(owner)
    }

    /// Allocate `page_count` frames for `owner` and publish its page table.
    ///
    /// Frames are claimed in ascending frame order, page `i` mapping to the `i`-th
    /// claimed frame. If the pool runs out midway, every frame claimed by this call
    /// is released again and the pool is left exactly as it was.
    pub fn allocate(&mut self, owner: &ProcessId, page_count: usize) -> Result<&PageTable, AllocError> {
        let allocator = self.allocator.as_mut().ok_or(AllocError::NotConfigured)?;
        if page_count == 0 {
            return Err(AllocError::EmptyRequest);
        }
        if self.page_tables.contains(owner) {
            return Err(AllocError::AlreadyAllocated);
        }

        let available = allocator.free_count();
        let frames = allocator
            .alloc_pages(owner, page_count)
            .ok_or(AllocError::OutOfFrames { requested: page_count, available })?;

        debug!("[pagemem] {} <- {} frames, first {}", owner, frames.len(), frames[0]);
        Ok(self.page_tables.insert(owner.clone(), PageTable::from_frames(frames)))
    }

    /// Release every frame held by `owner` and drop its page table.
    ///
    /// Returns the number of released frames; deallocating a process without frames
    /// does nothing.
    pub fn deallocate(&mut self, owner: &ProcessId) -> usize {
        let released = match self.allocator.as_mut() {
            Some(allocator) => allocator.page_frame_table_mut().release_owned(owner),
            None => 0,
        };
        self.page_tables.remove(owner);
        if released > 0 {
            debug!("[pagemem] {} -> released {} frames", owner, released);
        }
        released
    }

    /// Free every frame and drop all page tables, keeping the configured frame count.
    pub fn release_all(&mut self) {
        if let Some(allocator) = self.allocator.as_mut() {
            allocator.page_frame_table_mut().release_all();
        }
        self.page_tables.clear();
    }
}

#[cfg(test)]
mod test {
    use super::{AllocError, ConfigureError, FramePool};
    use crate::physical::PageFrame;
    use crate::{ProcessId, MAX_FRAME_COUNT, MIN_FRAME_COUNT};

    fn pool(frames: usize) -> FramePool {
        let mut pool = FramePool::new();
        pool.configure(frames).expect("valid frame count");
        pool
    }

    fn occupancy(pool: &FramePool) -> Vec<Option<String>> {
        pool.frames()
            .iter()
            .map(|f| f.owner().map(|p| p.as_str().to_string()))
            .collect()
    }

    #[test]
    fn test_configure_yields_free_frames() {
        for count in MIN_FRAME_COUNT..=MAX_FRAME_COUNT {
            let pool = pool(count);
            assert_eq!(pool.frame_count(), count);
            assert_eq!(pool.free_frame_count(), count);
            let frames = pool.frames();
            assert_eq!(frames.len(), count);
            assert!(frames.iter().all(|f| !f.is_occupied()));
            assert!(frames.iter().enumerate().all(|(i, f)| f.id() == PageFrame(i)));
        }
    }

    #[test]
    fn test_configure_bounds() {
        let mut pool = FramePool::new();
        assert_eq!(pool.configure(3), Err(ConfigureError::InvalidFrameCount(3)));
        assert_eq!(pool.configure(33), Err(ConfigureError::InvalidFrameCount(33)));
        assert!(!pool.is_configured());
        assert_eq!(pool.frame_count(), 0);
        assert!(pool.configure(4).is_ok());
        assert!(pool.configure(32).is_ok());
        assert_eq!(pool.frame_count(), 32);
    }

    #[test]
    fn test_reconfigure_refused_while_allocated() {
        let mut pool = pool(8);
        let owner = ProcessId::from("P1");
        pool.allocate(&owner, 2).expect("allocation");
        assert_eq!(pool.configure(16), Err(ConfigureError::AllocationsOutstanding));
        assert_eq!(pool.frame_count(), 8);

        pool.deallocate(&owner);
        assert!(pool.configure(16).is_ok());
        assert_eq!(pool.free_frame_count(), 16);
    }

    #[test]
    fn test_allocate_unconfigured() {
        let mut pool = FramePool::new();
        assert_eq!(
            pool.allocate(&ProcessId::from("P1"), 1).err(),
            Some(AllocError::NotConfigured)
        );
    }

    #[test]
    fn test_allocate_is_first_fit() {
        let mut pool = pool_with_layout(&[true, false, true, false, false]);
        let table = pool.allocate(&ProcessId::from("P"), 2).expect("two free frames");
        let mapping: Vec<_> = table.entries().iter().map(|e| (e.page(), e.frame())).collect();
        assert_eq!(mapping, vec![(0, PageFrame(1)), (1, PageFrame(3))]);
    }

    /// Build a pool whose occupancy follows `layout`: every frame is claimed by its own
    /// filler process, then the fillers of the free slots are released.
    fn pool_with_layout(layout: &[bool]) -> FramePool {
        let mut pool = pool(layout.len());
        let fillers: Vec<_> = (0..layout.len())
            .map(|i| ProcessId::new(format!("f{}", i)))
            .collect();
        for filler in &fillers {
            pool.allocate(filler, 1).expect("frame");
        }
        for (filler, occupied) in fillers.iter().zip(layout) {
            if !occupied {
                pool.deallocate(filler);
            }
        }
        pool
    }

    #[test]
    fn test_allocate_is_atomic() {
        let mut pool = pool_with_layout(&[true, false, true, false, false]);
        let before = occupancy(&pool);

        let err = pool.allocate(&ProcessId::from("big"), 4).err();
        assert_eq!(err, Some(AllocError::OutOfFrames { requested: 4, available: 3 }));
        assert_eq!(occupancy(&pool), before);
        assert!(pool.page_table(&ProcessId::from("big")).is_none());
    }

    #[test]
    fn test_allocate_deallocate_round_trip() {
        let mut pool = pool_with_layout(&[false, true, false, false, true, false]);
        let before = occupancy(&pool);
        let owner = ProcessId::from("P9");

        pool.allocate(&owner, 3).expect("allocation");
        assert_eq!(pool.free_frame_count(), 1);
        assert_eq!(pool.deallocate(&owner), 3);
        assert_eq!(occupancy(&pool), before);
    }

    #[test]
    fn test_page_table_matches_request() {
        let mut pool = pool(12);
        for (name, pages) in &[("A", 1), ("B", 4), ("C", 7)] {
            let owner = ProcessId::from(*name);
            let table = pool.allocate(&owner, *pages).expect("allocation");
            assert_eq!(table.page_count(), *pages);
            let numbers: Vec<_> = table.entries().iter().map(|e| e.page()).collect();
            assert_eq!(numbers, (0..*pages).collect::<Vec<_>>());
        }
        for (owner, table) in pool.page_tables().iter() {
            for entry in table.entries() {
                let frame = &pool.frames()[entry.frame().0];
                assert_eq!(frame.owner(), Some(owner));
            }
        }
    }

    #[test]
    fn test_allocate_twice_refused() {
        let mut pool = pool(8);
        let owner = ProcessId::from("P1");
        pool.allocate(&owner, 2).expect("allocation");
        assert_eq!(pool.allocate(&owner, 1).err(), Some(AllocError::AlreadyAllocated));
        let frames: Vec<_> = pool
            .page_table(&owner)
            .expect("first table kept")
            .entries()
            .iter()
            .map(|e| e.frame())
            .collect();
        assert_eq!(frames, vec![PageFrame(0), PageFrame(1)]);
        assert_eq!(pool.allocate(&ProcessId::from("P2"), 0).err(), Some(AllocError::EmptyRequest));
        assert_eq!(pool.free_frame_count(), 6);
    }

    #[test]
    fn test_deallocate_is_idempotent() {
        let mut pool = pool(6);
        let owner = ProcessId::from("P1");
        pool.allocate(&owner, 3).expect("allocation");

        assert_eq!(pool.deallocate(&owner), 3);
        let after_first = occupancy(&pool);
        assert_eq!(pool.deallocate(&owner), 0);
        assert_eq!(occupancy(&pool), after_first);
        assert!(pool.page_tables().is_empty());
    }

    #[test]
    fn test_release_all_keeps_configuration() {
        let mut pool = pool(10);
        pool.allocate(&ProcessId::from("A"), 4).expect("A");
        pool.allocate(&ProcessId::from("B"), 2).expect("B");
        pool.release_all();
        assert_eq!(pool.frame_count(), 10);
        assert_eq!(pool.free_frame_count(), 10);
        assert!(pool.page_tables().is_empty());
        let stats = pool.stats().expect("configured");
        assert_eq!(stats.allocated_count, 0);
    }
}
