//! Shortest-job-first execution loop.
//!
//! A run snapshots the waiting processes, orders them by burst and then drives them
//! one at a time through allocate, execute and deallocate. The loop never blocks:
//! each call to `step` does the work up to the next point where time passes and
//! reports what kind of pause that is. Between two steps the host may render, sleep
//! or do whatever it likes.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use pagemem::ProcessId;

use crate::context::Context;
use crate::observer::{Level, Observer};
use crate::process::LifecycleState;
use crate::sjf::shortest_job_first;

/// The kind of time passing between two steps of a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pause {
    /// One unit of the running process' burst.
    BurstUnit,
    /// The settling gap after a process had its turn.
    Settle,
}

/// Result of asking for a new run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunStart {
    Started { queued: usize },
    /// A run is already in progress; nothing was started.
    AlreadyRunning,
}

/// Why a run could not be started.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotReady {
    MemoryNotConfigured,
    NoProcesses,
}

impl fmt::Display for NotReady {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            NotReady::MemoryNotConfigured => "Please configure memory first!",
            NotReady::NoProcesses => "Please add at least one process!",
        })
    }
}

/// What happened to the processes of one run, each list in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Ran their full burst.
    pub completed: Vec<ProcessId>,
    /// Did not fit into the free frames and stay waiting for a later run.
    pub deferred: Vec<ProcessId>,
    /// Passed the free frame check but could not be started.
    pub failed: Vec<ProcessId>,
}

struct Burst {
    id: ProcessId,
    elapsed: u32,
    length: u32,
}

struct Run {
    queue: VecDeque<ProcessId>,
    current: Option<Burst>,
    report: RunReport,
}

enum Dispatch {
    Started(u32),
    Deferred,
    Failed,
    Skipped,
}

/// Drives at most one run at a time.
#[derive(Default)]
pub(crate) struct Scheduler {
    active: Option<Run>,
    last_report: Option<RunReport>,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler {
            active: None,
            last_report: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Report of the most recently finished run, if not taken yet.
    pub fn take_report(&mut self) -> Option<RunReport> {
        self.last_report.take()
    }

    /// Begin a run over the currently waiting processes.
    ///
    /// Starting while a run is active changes nothing and reports `AlreadyRunning`.
    pub fn start<O: Observer>(&mut self, ctx: &Context, observer: &mut O) -> Result<RunStart, NotReady> {
        if !ctx.pool.is_configured() {
            return Err(NotReady::MemoryNotConfigured);
        }
        if ctx.registry.is_empty() {
            return Err(NotReady::NoProcesses);
        }
        if self.is_running() {
            observer.on_log("Simulation already running", Level::Warning);
            return Ok(RunStart::AlreadyRunning);
        }

        let queue = shortest_job_first(ctx.registry.waiting_processes());
        let queued = queue.len();
        debug!(
            "[sched] run order: [{}]",
            queue.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
        );
        observer.on_log("=== Simulation Started ===", Level::Info);
        observer.on_log(
            &format!("Sorted {} processes by burst time (SJF)", queued),
            Level::Info,
        );

        self.last_report = None;
        self.active = Some(Run {
            queue,
            current: None,
            report: RunReport::default(),
        });
        Ok(RunStart::Started { queued })
    }

    /// Advance the active run up to its next pause.
    ///
    /// Returns `None` once the run is over (or if there is none); the run's report is
    /// then available from `take_report`.
    pub fn step<O: Observer>(&mut self, ctx: &mut Context, observer: &mut O) -> Option<Pause> {
        let run = self.active.as_mut()?;

        if let Some(burst) = run.current.as_mut() {
            burst.elapsed += 1;
            observer.on_log(
                &format!("{} executing... ({}/{})", burst.id, burst.elapsed, burst.length),
                Level::Info,
            );
            if burst.elapsed < burst.length {
                return Some(Pause::BurstUnit);
            }
            let id = burst.id.clone();
            run.current = None;
            if complete(ctx, observer, &id) {
                run.report.completed.push(id);
            } else {
                run.report.failed.push(id);
            }
            return Some(Pause::Settle);
        }

        while let Some(id) = run.queue.pop_front() {
            match dispatch(ctx, observer, &id) {
                Dispatch::Started(length) => {
                    run.current = Some(Burst { id, elapsed: 0, length });
                    return Some(Pause::BurstUnit);
                }
                Dispatch::Deferred => {
                    run.report.deferred.push(id);
                    return Some(Pause::Settle);
                }
                Dispatch::Failed => {
                    run.report.failed.push(id);
                    return Some(Pause::Settle);
                }
                Dispatch::Skipped => continue,
            }
        }

        observer.on_log("=== Simulation Complete ===", Level::Success);
        self.last_report = self.active.take().map(|run| run.report);
        debug!("[sched] run finished: {:?}", self.last_report);
        None
    }
}

/// Try to give `id` its frames and put it into the running state.
fn dispatch<O: Observer>(ctx: &mut Context, observer: &mut O, id: &ProcessId) -> Dispatch {
    let (page_count, burst) = match ctx.registry.get(id) {
        Some(p) if p.state() == LifecycleState::Waiting => (p.page_count(), p.burst()),
        _ => {
            debug!("[sched] {} is no longer waiting, skipping", id);
            return Dispatch::Skipped;
        }
    };

    observer.on_log(&format!("Executing process {}...", id), Level::Info);

    // advisory only; `allocate` checks again on its own
    let free = ctx.pool.free_frame_count();
    if free < page_count {
        observer.on_log(
            &format!(
                "Not enough memory for {} (needs {}, available {})",
                id, page_count, free
            ),
            Level::Error,
        );
        ctx.publish_queue(observer);
        return Dispatch::Deferred;
    }

    if let Err(err) = ctx.pool.allocate(id, page_count).map(|_| ()) {
        warn!("[sched] allocation for {} failed despite free frames: {}", id, err);
        observer.on_log(&format!("Failed to allocate memory for {}", id), Level::Error);
        return Dispatch::Failed;
    }

    if let Err(err) = ctx.registry.transition(id, LifecycleState::Running) {
        error!("[sched] {}", err);
        ctx.pool.deallocate(id);
        observer.on_log(&format!("Cannot run {}: {}", id, err), Level::Error);
        return Dispatch::Failed;
    }

    ctx.publish_all(observer);
    observer.on_log(
        &format!("Process {} allocated {} frames", id, page_count),
        Level::Success,
    );
    Dispatch::Started(burst)
}

/// Release the frames of `id` and mark it completed. Returns whether it completed.
fn complete<O: Observer>(ctx: &mut Context, observer: &mut O, id: &ProcessId) -> bool {
    ctx.pool.deallocate(id);
    let completed = match ctx.registry.transition(id, LifecycleState::Completed) {
        Ok(()) => {
            observer.on_log(
                &format!("Process {} completed and deallocated", id),
                Level::Success,
            );
            true
        }
        Err(err) => {
            error!("[sched] {}", err);
            observer.on_log(&format!("Cannot complete {}: {}", id, err), Level::Error);
            false
        }
    };
    ctx.publish_all(observer);
    completed
}
