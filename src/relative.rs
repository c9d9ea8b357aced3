//! Calendar-aware relative time descriptions.
//!
//! The difference between two instants is broken down field by field
//! (years down to seconds) with borrows across months of varying length,
//! instead of dividing a raw duration into fixed-size units.

use std::fmt;

use crate::{days_in_month, CalendarTime, Clock};

const NANOS_PER_SEC: i128 = 1_000_000_000;

const UNITS: [&str; 6] = ["year", "month", "day", "hour", "minute", "second"];

/// Non-negative calendar distance between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Breakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Breakdown {
    /// Decomposes the gap from `earlier` to `later`. Expects `earlier <= later`.
    ///
    /// Works on the local calendar fields of each value. If `later`'s fields read
    /// before `earlier`'s (offsets far enough apart), `later` is re-expressed at
    /// `earlier`'s offset first.
    ///
    /// Each borrow decrements the next coarser field of `later` before that
    /// field is subtracted, so the steps must run from seconds up to years.
    /// The day borrow is the exception: it adds the length of the month before
    /// `later`'s month but leaves the month field alone.
    pub fn between(earlier: &CalendarTime, later: &CalendarTime) -> Self {
        let later = &if later.local_epoch_secs() < earlier.local_epoch_secs() {
            later.to_offset(earlier.offset()).unwrap_or(*later)
        } else {
            *later
        };

        let mut year = later.year() as i64;
        let month = later.month() as i64;
        let mut day = later.day() as i64;
        let mut hour = later.hour() as i64;
        let mut minute = later.minute() as i64;

        let mut seconds = later.second() as i64 - earlier.second() as i64;
        if seconds < 0 {
            seconds += 60;
            minute -= 1;
        }

        let mut minutes = minute - earlier.minute() as i64;
        if minutes < 0 {
            minutes += 60;
            hour -= 1;
        }

        let mut hours = hour - earlier.hour() as i64;
        if hours < 0 {
            hours += 24;
            day -= 1;
        }

        let mut days = day - earlier.day() as i64;
        if days < 0 {
            // never less than the earlier day, or a short month leaves `days` negative
            let (prev_year, prev_month) = previous_month(year, month);
            let borrowed = days_in_month(prev_year, prev_month) as i64;
            days += borrowed.max(earlier.day() as i64);
        }

        let mut months = month - earlier.month() as i64;
        if months < 0 {
            months += 12;
            year -= 1;
        }

        let years = year - earlier.year() as i64;

        Self {
            years: years as u32,
            months: months as u32,
            days: days as u32,
            hours: hours as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
        }
    }

    /// Values in rendering order, paired with [`UNITS`].
    fn fields(&self) -> [u32; 6] {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.fields().iter().all(|&v| v == 0)
    }
}

/// Renders the non-zero fields, e.g. "1 hour, 9 minutes, 7 seconds".
impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (value, unit) in self.fields().into_iter().zip(UNITS) {
            if value == 0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{} {}", value, unit)?;
            if value > 1 {
                f.write_str("s")?;
            }
        }
        Ok(())
    }
}

/// Year and month immediately before `month` of `year`.
fn previous_month(year: i64, month: i64) -> (i32, u8) {
    if month <= 1 {
        ((year - 1) as i32, 12)
    } else {
        (year as i32, (month - 1) as u8)
    }
}

/// Where `then` sits relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relative {
    /// Less than a second apart, in either direction.
    Now,
    Past(Breakdown),
    Future(Breakdown),
}

impl Relative {
    pub fn between(then: &CalendarTime, now: &CalendarTime) -> Self {
        let diff = now.diff_nanos(then);
        if diff.abs() < NANOS_PER_SEC {
            return Relative::Now;
        }
        if diff > 0 {
            Relative::Past(Breakdown::between(then, now))
        } else {
            Relative::Future(Breakdown::between(now, then))
        }
    }

    pub fn breakdown(&self) -> Option<&Breakdown> {
        match self {
            Relative::Now => None,
            Relative::Past(b) | Relative::Future(b) => Some(b),
        }
    }
}

impl fmt::Display for Relative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (breakdown, suffix) = match self {
            Relative::Now => return f.write_str("now"),
            Relative::Past(b) => (b, "ago"),
            Relative::Future(b) => (b, "in the future"),
        };
        if breakdown.is_zero() {
            f.write_str(suffix)
        } else {
            write!(f, "{} {}", breakdown, suffix)
        }
    }
}

/// Human-readable distance of `then` from `now`, e.g.
/// "30 days, 23 hours, 52 minutes, 14 seconds ago" or "30 seconds in the future".
pub fn describe(then: &CalendarTime, now: &CalendarTime) -> String {
    Relative::between(then, now).to_string()
}

/// Same as [`describe`], with "now" read from `clock`.
pub fn describe_from_now<C: Clock>(then: &CalendarTime, clock: &C) -> String {
    describe(then, &clock.now())
}
