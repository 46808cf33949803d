//! A paging memory allocator driving a single-processor batch scheduler.
//!
//! Processes request a number of pages from a fixed pool of frames and are run one
//! after another, shortest burst first. The whole state lives in one [`Simulation`];
//! everything a presentation layer needs to render is published through an
//! [`Observer`].

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate static_assertions;

extern crate alloc;

pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod observer;
pub mod process;
pub mod scheduler;
pub mod shared;
pub mod simulation;
mod context;
mod sjf;
#[cfg(test)]
mod testing;

pub use pagemem::{Frame, PageFrame, PageTable, PageTableEntry, PageTableStore, ProcessId};

pub use self::clock::{Clock, NoDelay};
pub use self::config::SimConfig;
pub use self::error::SimError;
pub use self::observer::{Level, Observer};
pub use self::process::{LifecycleState, Process};
pub use self::scheduler::{NotReady, Pause, RunReport, RunStart};
pub use self::shared::SharedSimulation;
pub use self::simulation::Simulation;
