//! Plain text rendering of the simulation tables.

use alloc::format;
use alloc::string::String;
use core::fmt::{self, Write};

use pagemem::{Frame, PageTableStore};

use crate::observer::{Level, Observer};
use crate::process::Process;

pub fn write_frame_table<W: Write>(w: &mut W, frames: &[Frame]) -> fmt::Result {
    writeln!(w, "{: ^6} {: ^10}", "Frame", "Owner")?;
    let mut free = 0;
    for frame in frames {
        let owner = match frame.owner() {
            Some(owner) => owner.as_str(),
            None => {
                free += 1;
                "-"
            }
        };
        writeln!(w, "{: ^6} {: ^10}", format!("{}", frame.id()), owner)?;
    }
    writeln!(w, " Free: {}/{}", free, frames.len())
}

/// One block per process, listing which frame backs each of its pages.
pub fn write_page_tables<W: Write>(w: &mut W, tables: &PageTableStore) -> fmt::Result {
    if tables.is_empty() {
        return writeln!(w, "No page tables");
    }
    for (owner, table) in tables.iter() {
        writeln!(w, "{} ({} pages):", owner, table.page_count())?;
        for entry in table.entries() {
            writeln!(w, "  page {} -> {}", entry.page(), entry.frame())?;
        }
    }
    Ok(())
}

pub fn write_process_queue<W: Write>(w: &mut W, processes: &[Process]) -> fmt::Result {
    writeln!(w, "{: <8} {: >5} {: >5} {: <9}", "ID", "Pages", "Burst", "State")?;
    for p in processes {
        writeln!(
            w,
            "{: <8} {: >5} {: >5} {: <9}",
            p.id().as_str(),
            p.page_count(),
            p.burst(),
            format!("{}", p.state())
        )?;
    }
    Ok(())
}

/// Observer that forwards everything to the `log` facade.
///
/// Messages keep their severity; table snapshots are rendered at debug level.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogObserver;

impl LogObserver {
    fn dump<F>(what: &str, render: F)
    where
        F: FnOnce(&mut String) -> fmt::Result,
    {
        if !log_enabled!(log::Level::Debug) {
            return;
        }
        let mut out = String::new();
        match render(&mut out) {
            Ok(()) => debug!("[sim] {}:\n{}", what, out),
            Err(_) => warn!("[sim] could not render {}", what),
        }
    }
}

impl Observer for LogObserver {
    fn on_status(&mut self, key: &str, message: &str, level: Level) {
        log!(level.log_level(), "[{}] {}", key, message);
    }

    fn on_log(&mut self, message: &str, level: Level) {
        log!(level.log_level(), "[sim] {}", message);
    }

    fn on_log_cleared(&mut self) {
        debug!("[sim] log cleared");
    }

    fn on_process_queue_changed(&mut self, processes: &[Process]) {
        LogObserver::dump("process queue", |out| write_process_queue(out, processes));
    }

    fn on_frame_table_changed(&mut self, frames: &[Frame], configured: bool) {
        if configured {
            LogObserver::dump("frame table", |out| write_frame_table(out, frames));
        }
    }

    fn on_page_tables_changed(&mut self, tables: &PageTableStore) {
        LogObserver::dump("page tables", |out| write_page_tables(out, tables));
    }
}
