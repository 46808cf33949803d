#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;
#[macro_use]
extern crate static_assertions;

extern crate alloc;

pub mod paging;
pub mod physical;
pub mod pool;

use alloc::string::String;
use core::fmt;

pub use self::paging::{PageTable, PageTableEntry, PageTableStore};
pub use self::physical::{Frame, PageFrame};
pub use self::pool::{AllocError, ConfigureError, FramePool};

/// Smallest number of frames a pool can be configured with.
pub const MIN_FRAME_COUNT: usize = 4;

/// Largest number of frames a pool can be configured with.
pub const MAX_FRAME_COUNT: usize = 32;

const_assert!(frame_count_bounds; MIN_FRAME_COUNT >= 1 && MIN_FRAME_COUNT <= MAX_FRAME_COUNT);

/// Identifier of a process that owns page frames.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Clone)]
pub struct ProcessId(String);

impl ProcessId {
    pub fn new<S: Into<String>>(id: S) -> ProcessId {
        ProcessId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProcessId {
    fn from(id: &str) -> ProcessId {
        ProcessId::new(id)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
