//! Test doubles shared by the unit tests of this crate.

use std::collections::BTreeMap;
use std::time::Duration;

use pagemem::{Frame, PageTableStore, ProcessId};

use crate::clock::Clock;
use crate::observer::{Level, Observer};
use crate::process::{LifecycleState, Process};

/// Observer remembering everything it was told.
#[derive(Default)]
pub struct Recorder {
    pub statuses: Vec<(String, String, Level)>,
    pub logs: Vec<(String, Level)>,
    pub log_clears: usize,
    pub last_queue: Vec<(ProcessId, LifecycleState)>,
    pub last_frames: Vec<Frame>,
    pub configured: bool,
    /// Page count per process of the last published page tables.
    pub last_page_tables: BTreeMap<ProcessId, usize>,
    pub queue_updates: usize,
    pub frame_updates: usize,
    pub page_table_updates: usize,
}

impl Recorder {
    pub fn logged(&self, message: &str) -> bool {
        self.count(message) > 0
    }

    pub fn count(&self, message: &str) -> usize {
        self.logs.iter().filter(|(m, _)| m == message).count()
    }

    pub fn messages_at(&self, level: Level) -> Vec<&str> {
        self.logs
            .iter()
            .filter(|(_, l)| *l == level)
            .map(|(m, _)| m.as_str())
            .collect()
    }
}

impl Observer for Recorder {
    fn on_status(&mut self, key: &str, message: &str, level: Level) {
        self.statuses.push((key.to_string(), message.to_string(), level));
    }

    fn on_log(&mut self, message: &str, level: Level) {
        self.logs.push((message.to_string(), level));
    }

    fn on_log_cleared(&mut self) {
        self.logs.clear();
        self.log_clears += 1;
    }

    fn on_process_queue_changed(&mut self, processes: &[Process]) {
        self.last_queue = processes.iter().map(|p| (p.id().clone(), p.state())).collect();
        self.queue_updates += 1;
    }

    fn on_frame_table_changed(&mut self, frames: &[Frame], configured: bool) {
        self.last_frames = frames.to_vec();
        self.configured = configured;
        self.frame_updates += 1;
    }

    fn on_page_tables_changed(&mut self, tables: &PageTableStore) {
        self.last_page_tables = tables
            .iter()
            .map(|(id, table)| (id.clone(), table.page_count()))
            .collect();
        self.page_table_updates += 1;
    }
}

/// Clock that records every requested pause instead of sleeping.
#[derive(Default)]
pub struct RecordingClock {
    pub sleeps: Vec<Duration>,
}

impl RecordingClock {
    pub fn total(&self) -> Duration {
        self.sleeps.iter().sum()
    }
}

impl Clock for RecordingClock {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}
