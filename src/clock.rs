//! Execution-environment clock
//!
//! Record timestamps come from the environment, never from the client.

use chrono::Utc;

/// Source of the current time in whole seconds since the Unix epoch
pub trait Clock {
    fn unix_timestamp(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to one instant, for deterministic runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn unix_timestamp(&self) -> i64 {
        (**self).unix_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.unix_timestamp() > 1_577_836_800);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(42);
        assert_eq!(clock.unix_timestamp(), 42);
        assert_eq!((&clock).unix_timestamp(), 42);
    }
}
