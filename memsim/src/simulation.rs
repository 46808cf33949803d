//! The owning context of a simulation and the operations a host calls on it.

use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use pagemem::{Frame, FramePool, PageTableStore, ProcessId, MIN_FRAME_COUNT};

use crate::clock::Clock;
use crate::config::SimConfig;
use crate::context::Context;
use crate::error::SimError;
use crate::observer::{Level, Observer};
use crate::process::Process;
use crate::scheduler::{NotReady, Pause, RunReport, RunStart, Scheduler};

/// Status key under which configuration results are reported.
pub const MEMORY_STATUS: &str = "memory";

/// Frame pool, process registry and scheduler, plus the observer they report to.
///
/// All mutation goes through `&mut self`, so allocation, deallocation and state
/// transitions can never interleave. Hosts that need to share a simulation between
/// threads wrap it in a [`SharedSimulation`](crate::SharedSimulation).
pub struct Simulation<O = ()> {
    ctx: Context,
    scheduler: Scheduler,
    observer: O,
    config: SimConfig,
}

impl Simulation<()> {
    /// A simulation nobody is watching.
    pub fn new() -> Self {
        Simulation::with_observer(())
    }
}

impl Default for Simulation<()> {
    fn default() -> Self {
        Simulation::new()
    }
}

impl<O: Observer> Simulation<O> {
    pub fn with_observer(mut observer: O) -> Self {
        observer.on_log("System initialized. Configure memory to begin.", Level::Info);
        Simulation {
            ctx: Context::new(),
            scheduler: Scheduler::new(),
            observer,
            config: SimConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn pool(&self) -> &FramePool {
        &self.ctx.pool
    }

    /// Snapshot of the frame table; empty until memory is configured.
    pub fn frames(&self) -> Vec<Frame> {
        self.ctx.pool.frames()
    }

    pub fn page_tables(&self) -> &PageTableStore {
        self.ctx.pool.page_tables()
    }

    /// All processes in submission order.
    pub fn processes(&self) -> &[Process] {
        self.ctx.registry.processes()
    }

    pub fn process(&self, id: &ProcessId) -> Option<&Process> {
        self.ctx.registry.get(id)
    }

    pub fn waiting_processes(&self) -> impl Iterator<Item = &Process> {
        self.ctx.registry.waiting_processes()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Set up memory with `frame_count` free frames.
    pub fn configure(&mut self, frame_count: usize) -> Result<(), SimError> {
        match self.try_configure(frame_count) {
            Ok(()) => {
                self.observer.on_status(
                    MEMORY_STATUS,
                    &format!("Memory configured with {} frames.", frame_count),
                    Level::Success,
                );
                self.observer
                    .on_log(&format!("Memory configured: {} frames", frame_count), Level::Success);
                self.ctx.publish_frames(&mut self.observer);
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                self.observer.on_status(MEMORY_STATUS, &message, Level::Error);
                self.observer.on_log(&message, Level::Error);
                Err(err)
            }
        }
    }

    fn try_configure(&mut self, frame_count: usize) -> Result<(), SimError> {
        if self.is_running() {
            return Err(SimError::Busy);
        }
        let current = self.ctx.pool.frame_count();
        if frame_count >= MIN_FRAME_COUNT && frame_count < current && !self.ctx.registry.is_empty() {
            return Err(SimError::Shrink {
                current,
                requested: frame_count,
            });
        }
        self.ctx.pool.configure(frame_count)?;
        Ok(())
    }

    /// Admit a waiting process. A blank `id` gets a generated one.
    pub fn submit(&mut self, id: &str, page_count: usize, burst: u32) -> Result<Process, SimError> {
        match self.try_submit(id, page_count, burst) {
            Ok(process) => {
                self.observer.on_log(
                    &format!(
                        "Process {} added (Size: {}, Burst: {})",
                        process.id(),
                        process.page_count(),
                        process.burst()
                    ),
                    Level::Success,
                );
                self.ctx.publish_queue(&mut self.observer);
                Ok(process)
            }
            Err(err) => {
                self.observer.on_log(&err.to_string(), Level::Error);
                Err(err)
            }
        }
    }

    fn try_submit(&mut self, id: &str, page_count: usize, burst: u32) -> Result<Process, SimError> {
        if !self.ctx.pool.is_configured() {
            return Err(NotReady::MemoryNotConfigured.into());
        }
        let max_pages = self.ctx.pool.frame_count();
        let process = self.ctx.registry.submit(id, page_count, burst, max_pages)?;
        Ok(process)
    }

    /// Start a run over the waiting processes. Nothing happens until `step` is called.
    pub fn start_run(&mut self) -> Result<RunStart, SimError> {
        match self.scheduler.start(&self.ctx, &mut self.observer) {
            Ok(started) => Ok(started),
            Err(err) => {
                self.observer.on_log(&err.to_string(), Level::Error);
                Err(err.into())
            }
        }
    }

    /// Advance the active run to its next pause. `None` once there is nothing left to do.
    pub fn step(&mut self) -> Option<Pause> {
        self.scheduler.step(&mut self.ctx, &mut self.observer)
    }

    /// Run all waiting processes to the end, letting `clock` pace the pauses.
    ///
    /// Fails with `SimError::Busy` and leaves the active run alone if one is already in
    /// progress; only the caller that started a run drives it and gets its report.
    pub fn run<C: Clock>(&mut self, mut clock: C) -> Result<RunReport, SimError> {
        if self.start_run()? == RunStart::AlreadyRunning {
            return Err(SimError::Busy);
        }
        while let Some(pause) = self.step() {
            clock.sleep(self.config.duration_of(pause));
        }
        Ok(self.scheduler.take_report().unwrap_or_default())
    }

    /// Report of the last finished run, if it has not been taken yet.
    pub fn take_report(&mut self) -> Option<RunReport> {
        self.scheduler.take_report()
    }

    /// Forget all processes and free every frame. The memory configuration is kept.
    pub fn reset(&mut self) -> Result<(), SimError> {
        if self.is_running() {
            self.observer
                .on_log("Cannot reset while the simulation is running", Level::Warning);
            return Err(SimError::Busy);
        }
        self.ctx.registry.reset_all();
        self.ctx.pool.release_all();
        self.scheduler.take_report();
        debug!("[sched] reset");

        self.ctx.publish_all(&mut self.observer);
        self.observer.on_log_cleared();
        self.observer.on_log("Simulation reset", Level::Warning);
        Ok(())
    }
}
