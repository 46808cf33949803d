//! Mapping of simulated pauses onto real time.

use core::time::Duration;

/// Something that can let time pass between two steps of a run.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// A clock that does not wait at all, e.g. for batch runs and tests.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoDelay;

impl Clock for NoDelay {
    fn sleep(&mut self, _duration: Duration) {}
}

impl<'a, C: Clock + ?Sized> Clock for &'a mut C {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}
