//! A simulation that can be driven from one thread and inspected from others.

use spin::Mutex;

use crate::clock::Clock;
use crate::error::SimError;
use crate::observer::Observer;
use crate::scheduler::{Pause, RunReport, RunStart};
use crate::simulation::Simulation;

/// Spin-lock protected [`Simulation`].
///
/// Every operation locks the whole simulation, so the observed state is always
/// consistent. `run` holds the lock only while stepping and never while the clock
/// sleeps, which lets other threads configure, submit or render in between.
pub struct SharedSimulation<O = ()> {
    inner: Mutex<Simulation<O>>,
}

impl<O: Observer> SharedSimulation<O> {
    pub fn new(simulation: Simulation<O>) -> SharedSimulation<O> {
        SharedSimulation {
            inner: Mutex::new(simulation),
        }
    }

    /// Run `callback` with exclusive access to the simulation.
    pub fn with_lock<F, R>(&self, callback: F) -> R
    where
        F: FnOnce(&mut Simulation<O>) -> R,
    {
        let mut guard = self.inner.lock();
        callback(&mut *guard)
    }

    pub fn start_run(&self) -> Result<RunStart, SimError> {
        self.with_lock(|sim| sim.start_run())
    }

    pub fn step(&self) -> Option<Pause> {
        self.with_lock(|sim| sim.step())
    }

    /// Like [`Simulation::run`], releasing the lock for every pause.
    ///
    /// A second caller while a run is active gets `SimError::Busy`.
    pub fn run<C: Clock>(&self, mut clock: C) -> Result<RunReport, SimError> {
        if self.start_run()? == RunStart::AlreadyRunning {
            return Err(SimError::Busy);
        }
        loop {
            let next = self.with_lock(|sim| sim.step().map(|pause| sim.config().duration_of(pause)));
            match next {
                Some(duration) => clock.sleep(duration),
                None => break,
            }
        }
        Ok(self.with_lock(|sim| sim.take_report()).unwrap_or_default())
    }

    pub fn into_inner(self) -> Simulation<O> {
        self.inner.into_inner()
    }
}
