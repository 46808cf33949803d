//! Runtime settings of a simulation.

use core::time::Duration;

use crate::scheduler::Pause;

/// Wall-clock pacing of a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Time per unit of burst.
    pub burst_unit: Duration,
    /// Gap between two processes.
    pub settle: Duration,
}

impl SimConfig {
    pub const DEFAULT_BURST_UNIT: Duration = Duration::from_millis(200);
    pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

    /// Pacing without any delays.
    pub fn instant() -> SimConfig {
        SimConfig {
            burst_unit: Duration::from_millis(0),
            settle: Duration::from_millis(0),
        }
    }

    pub fn with_burst_unit(mut self, burst_unit: Duration) -> SimConfig {
        self.burst_unit = burst_unit;
        self
    }

    pub fn with_settle(mut self, settle: Duration) -> SimConfig {
        self.settle = settle;
        self
    }

    /// How long the given pause lasts.
    pub fn duration_of(&self, pause: Pause) -> Duration {
        match pause {
            Pause::BurstUnit => self.burst_unit,
            Pause::Settle => self.settle,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            burst_unit: SimConfig::DEFAULT_BURST_UNIT,
            settle: SimConfig::DEFAULT_SETTLE,
        }
    }
}

#[cfg(test)]
mod test {
    use super::SimConfig;
    use crate::scheduler::Pause;
    use core::time::Duration;

    #[test]
    fn test_default_pacing() {
        let config = SimConfig::default();
        assert_eq!(config.duration_of(Pause::BurstUnit), Duration::from_millis(200));
        assert_eq!(config.duration_of(Pause::Settle), Duration::from_millis(500));
    }

    #[test]
    fn test_builders() {
        let config = SimConfig::instant().with_settle(Duration::from_millis(7));
        assert_eq!(config.burst_unit, Duration::from_millis(0));
        assert_eq!(config.settle, Duration::from_millis(7));
        let config = config.with_burst_unit(Duration::from_secs(1));
        assert_eq!(config.duration_of(Pause::BurstUnit), Duration::from_secs(1));
    }
}
