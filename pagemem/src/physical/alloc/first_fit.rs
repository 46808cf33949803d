//! Allocator handing out the lowest numbered free frame first.

use crate::physical::alloc::PageFrameAllocator;
use crate::physical::mgmt::{PageFrameState, PageFrameTable};
use crate::physical::PageFrame;
use crate::ProcessId;

pub struct FirstFitAllocator {
    page_frame_table: PageFrameTable,
}

impl FirstFitAllocator {
    pub fn new(page_frames: PageFrameTable) -> Self {
        FirstFitAllocator {
            page_frame_table: page_frames,
        }
    }

    pub fn page_frame_table(&self) -> &PageFrameTable {
        &self.page_frame_table
    }

    pub fn page_frame_table_mut(&mut self) -> &mut PageFrameTable {
        &mut self.page_frame_table
    }
}

impl PageFrameAllocator for FirstFitAllocator {
    fn alloc(&mut self, owner: &ProcessId) -> Option<PageFrame> {
        // search first free frame
        for i in 0..self.page_frame_table.length() {
            let entry = self.page_frame_table.index_mut(i);
            if entry.state == PageFrameState::Free {
                entry.state = PageFrameState::Allocated(owner.clone());
                return Some(PageFrame(i));
            }
        }
        None
    }

    fn free(&mut self, frame: PageFrame) {
        let entry = self.page_frame_table.index_mut(frame.0);
        assert!(entry.is_allocated(), "freeing unallocated frame {}", frame);
        entry.state = PageFrameState::Free;
    }

    fn free_count(&self) -> usize {
        self.page_frame_table.stats().free_count()
    }
}
