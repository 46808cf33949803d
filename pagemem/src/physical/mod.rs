use core::fmt;
use core::ops;

use crate::ProcessId;

pub mod alloc;
pub mod mgmt;

/// Number of a physical page frame, counted from the start of the pool.
/// The first frame of a pool has number zero.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Copy, Clone)]
pub struct PageFrame(pub usize);

impl ops::Add<usize> for PageFrame {
    type Output = PageFrame;

    fn add(self, rhs: usize) -> PageFrame {
        PageFrame(self.0 + rhs)
    }
}

impl ops::AddAssign<usize> for PageFrame {
    fn add_assign(&mut self, rhs: usize) {
        self.0 += rhs;
    }
}

impl fmt::Display for PageFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// Point-in-time view of a single frame of the pool.
///
/// A frame is occupied exactly when it has an owner, so the two can never
/// disagree.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Frame {
    frame: PageFrame,
    owner: Option<ProcessId>,
}

impl Frame {
    pub fn new(frame: PageFrame, owner: Option<ProcessId>) -> Frame {
        Frame { frame, owner }
    }

    pub fn id(&self) -> PageFrame {
        self.frame
    }

    pub fn is_occupied(&self) -> bool {
        self.owner.is_some()
    }

    /// The process currently holding this frame, if any.
    pub fn owner(&self) -> Option<&ProcessId> {
        self.owner.as_ref()
    }
}
