//! Interface towards the presentation layer.
//!
//! The simulation never renders anything itself. It reports what happened and hands
//! out snapshots of its tables after every change; an `Observer` decides what to do
//! with them.

use pagemem::{Frame, PageTableStore};

use crate::process::Process;

/// Severity of a status or log message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    /// The `log` level used when forwarding a message to the logging facade.
    pub fn log_level(self) -> log::Level {
        match self {
            Level::Info | Level::Success => log::Level::Info,
            Level::Warning => log::Level::Warn,
            Level::Error => log::Level::Error,
        }
    }
}

/// Receives events from a simulation. All methods default to doing nothing.
pub trait Observer {
    /// Outcome of an operation the user triggered, e.g. configuring memory under the
    /// `"memory"` key.
    fn on_status(&mut self, _key: &str, _message: &str, _level: Level) {}

    /// A line for the simulation log.
    fn on_log(&mut self, _message: &str, _level: Level) {}

    /// The log should be emptied; sent on reset.
    fn on_log_cleared(&mut self) {}

    fn on_process_queue_changed(&mut self, _processes: &[Process]) {}

    fn on_frame_table_changed(&mut self, _frames: &[Frame], _configured: bool) {}

    fn on_page_tables_changed(&mut self, _tables: &PageTableStore) {}
}

impl Observer for () {}

impl<'a, O: Observer + ?Sized> Observer for &'a mut O {
    fn on_status(&mut self, key: &str, message: &str, level: Level) {
        (**self).on_status(key, message, level)
    }

    fn on_log(&mut self, message: &str, level: Level) {
        (**self).on_log(message, level)
    }

    fn on_log_cleared(&mut self) {
        (**self).on_log_cleared()
    }

    fn on_process_queue_changed(&mut self, processes: &[Process]) {
        (**self).on_process_queue_changed(processes)
    }

    fn on_frame_table_changed(&mut self, frames: &[Frame], configured: bool) {
        (**self).on_frame_table_changed(frames, configured)
    }

    fn on_page_tables_changed(&mut self, tables: &PageTableStore) {
        (**self).on_page_tables_changed(tables)
    }
}
