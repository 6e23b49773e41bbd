//! Time source for the hour fallback
//!
//! Encoder không gọi `Local::now()` trực tiếp - clock được inject để test
//! được nhánh fallback.

use chrono::{Local, Timelike};

/// Source of the current wall-clock hour
pub trait Clock: Send + Sync {
    /// Current hour of day, 0-23
    fn current_hour(&self) -> u32;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Clock pinned to one hour
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    hour: u32,
}

impl FixedClock {
    /// Hours past 23 wrap around the day
    pub fn new(hour: u32) -> Self {
        Self { hour: hour % 24 }
    }
}

impl Clock for FixedClock {
    fn current_hour(&self) -> u32 {
        self.hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_in_range() {
        assert!(SystemClock.current_hour() < 24);
    }

    #[test]
    fn test_fixed_clock_wraps() {
        assert_eq!(FixedClock::new(7).current_hour(), 7);
        assert_eq!(FixedClock::new(25).current_hour(), 1);
    }
}
