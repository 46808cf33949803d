use core::fmt;

use pagemem::ConfigureError;

use crate::process::SubmitError;
use crate::scheduler::NotReady;

/// Errors reported by the operations of a `Simulation`.
///
/// None of them changes any state: a rejected operation leaves the simulation exactly
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The frame pool rejected the new configuration.
    Configure(ConfigureError),
    /// Processes are registered and the pool would get smaller.
    Shrink { current: usize, requested: usize },
    /// The process was not admitted.
    Submit(SubmitError),
    NotReady(NotReady),
    /// The operation is not allowed while a run is in progress.
    Busy,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::Configure(err) => err.fmt(f),
            SimError::Shrink { current, requested } => write!(
                f,
                "Memory cannot shrink from {} to {} frames while processes are registered.",
                current, requested
            ),
            SimError::Submit(err) => err.fmt(f),
            SimError::NotReady(err) => err.fmt(f),
            SimError::Busy => f.write_str("Simulation is running."),
        }
    }
}

impl From<ConfigureError> for SimError {
    fn from(err: ConfigureError) -> SimError {
        SimError::Configure(err)
    }
}

impl From<SubmitError> for SimError {
    fn from(err: SubmitError) -> SimError {
        SimError::Submit(err)
    }
}

impl From<NotReady> for SimError {
    fn from(err: NotReady) -> SimError {
        SimError::NotReady(err)
    }
}
