//! Sources of "now".
//!
//! Anything that needs the current instant takes a [`Clock`] instead of
//! reading the wall clock itself, so callers can pin time to a fixed value.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::CalendarTime;

/// Capability that yields the current instant in UTC.
pub trait Clock {
    fn now(&self) -> CalendarTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> CalendarTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> CalendarTime {
        (**self).now()
    }
}

/// Wall clock, read through `SystemTime` with nanosecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> CalendarTime {
        let nanos = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_nanos() as i128,
            // system clock set before 1970
            Err(err) => -(err.duration().as_nanos() as i128),
        };
        // SystemTime cannot reach a year outside i32; the epoch fallback only
        // keeps the signature total
        let now = CalendarTime::from_epoch_nanos(nanos);
        debug_assert!(now.is_some(), "system clock out of calendar range");
        now.unwrap_or(CalendarTime::UNIX_EPOCH)
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarTime);

impl Clock for FixedClock {
    fn now(&self) -> CalendarTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let at = CalendarTime::from_epoch(1_569_110_219).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_clock_through_reference_and_box() {
        let at = CalendarTime::from_epoch(42).unwrap();
        let clock = FixedClock(at);
        let by_ref: &dyn Clock = &clock;
        let boxed: Box<dyn Clock> = Box::new(clock);
        assert_eq!(by_ref.now(), at);
        assert_eq!(boxed.now(), at);
    }

    #[test]
    fn test_system_clock_returns_valid_ranges() {
        let ct = SystemClock.now();
        assert!(ct.hour() <= 23);
        assert!(ct.minute() <= 59);
        assert!(ct.second() <= 59);
        assert!(ct.month() >= 1 && ct.month() <= 12);
        assert!(ct.day() >= 1 && ct.day() <= 31);
        assert!(ct.nanosecond() <= 999_999_999);
        assert!(ct.year() >= 1970);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        // wall clock can step backwards, but not by a whole minute between two reads
        assert!(second.diff_secs(&first) > -60);
    }
}
