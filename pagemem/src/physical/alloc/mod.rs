mod first_fit;

use alloc::vec::Vec;

use crate::physical::PageFrame;
use crate::ProcessId;

pub use self::first_fit::FirstFitAllocator;

/// Generic interface for a page frame allocator.
pub trait PageFrameAllocator {
    /// Allocate a single page frame on behalf of `owner`.
    fn alloc(&mut self, owner: &ProcessId) -> Option<PageFrame>;
    /// Free a single page frame previously allocated via `alloc`.
    fn free(&mut self, frame: PageFrame);
    /// Number of frames that can currently be allocated.
    fn free_count(&self) -> usize;

    /// Allocate `page_count` frames for `owner`, in the order the allocator hands them out.
    ///
    /// Either all frames are allocated or none: if the allocator runs dry midway,
    /// the frames claimed so far are freed again before `None` is returned.
    fn alloc_pages(&mut self, owner: &ProcessId, page_count: usize) -> Option<Vec<PageFrame>> {
        let mut claimed = Vec::with_capacity(page_count);
        while claimed.len() < page_count {
            match self.alloc(owner) {
                Some(frame) => claimed.push(frame),
                None => {
                    trace!("[pagemem] rolling back {} frames of {}", claimed.len(), owner);
                    for frame in claimed {
                        self.free(frame);
                    }
                    return None;
                }
            }
        }
        Some(claimed)
    }
}
