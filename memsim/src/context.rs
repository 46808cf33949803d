use pagemem::FramePool;

use crate::observer::Observer;
use crate::process::ProcessRegistry;

/// The state every part of the simulation works on: one frame pool and one registry.
#[derive(Default)]
pub struct Context {
    pub pool: FramePool,
    pub registry: ProcessRegistry,
}

impl Context {
    pub fn new() -> Context {
        Context {
            pool: FramePool::new(),
            registry: ProcessRegistry::new(),
        }
    }

    pub fn publish_queue<O: Observer>(&self, observer: &mut O) {
        observer.on_process_queue_changed(self.registry.processes());
    }

    pub fn publish_frames<O: Observer>(&self, observer: &mut O) {
        observer.on_frame_table_changed(&self.pool.frames(), self.pool.is_configured());
    }

    pub fn publish_page_tables<O: Observer>(&self, observer: &mut O) {
        observer.on_page_tables_changed(self.pool.page_tables());
    }

    /// Publish the registry, the frames and the page tables.
    pub fn publish_all<O: Observer>(&self, observer: &mut O) {
        self.publish_queue(observer);
        self.publish_frames(observer);
        self.publish_page_tables(observer);
    }
}

