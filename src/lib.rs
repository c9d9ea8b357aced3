use std::cmp::Ordering;
use std::fmt;

pub mod clock;
pub mod relative;

pub use clock::{Clock, FixedClock, SystemClock};
pub use relative::{describe, describe_from_now, Breakdown, Relative};

const SECS_PER_DAY: i64 = 86_400;
const NANOS_PER_SEC: i128 = 1_000_000_000;
const MAX_OFFSET_SECS: i32 = 86_399;

/// Gregorian leap-year rule, valid for zero and negative (proleptic) years.
pub fn is_leap_year(year: i32) -> bool {
    (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
}

/// Number of days in `month` (1–12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Converts Unix epoch seconds to a CalendarTime using Howard Hinnant's civil_from_days algorithm.
/// Returns `None` when the resulting year does not fit in an `i32`.
fn epoch_to_date(secs: i64) -> Option<CalendarTime> {
    let day_secs = secs.rem_euclid(SECS_PER_DAY);
    let hour = (day_secs / 3600) as u8;
    let minute = ((day_secs % 3600) / 60) as u8;
    let second = (day_secs % 60) as u8;

    // Days since 1970-01-01
    let z = secs.div_euclid(SECS_PER_DAY) + 719468; // shift epoch to 0000-03-01
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32; // day of era [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // year of era [0, 399]
    let y = (yoe as i64) + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year [0, 365]
    let mp = (5 * doy + 2) / 153; // month proxy [0, 11]
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = i32::try_from(if month <= 2 { y + 1 } else { y }).ok()?;

    Some(CalendarTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
        nanosecond: 0,
        offset: 0,
    })
}

/// A point in time broken down into calendar fields.
///
/// The fields are local to a fixed UTC offset, which is zero unless the value
/// was re-expressed with [`CalendarTime::to_offset`]. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarTime {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
    offset: i32,
}

impl CalendarTime {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: CalendarTime = CalendarTime {
        year: 1970,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        nanosecond: 0,
        offset: 0,
    };

    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(year, month) {
            return None;
        }
        if hour > 23 {
            return None;
        }
        if minute > 59 {
            return None;
        }
        if second > 59 {
            return None;
        }
        if nanosecond > 999_999_999 {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            offset: 0,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u8 {
        self.month
    }
    pub fn day(&self) -> u8 {
        self.day
    }
    pub fn hour(&self) -> u8 {
        self.hour
    }
    pub fn minute(&self) -> u8 {
        self.minute
    }
    pub fn second(&self) -> u8 {
        self.second
    }
    pub fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    /// UTC offset of the calendar fields, in seconds east of Greenwich.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Re-expresses the same instant in calendar fields at `offset_secs` east of UTC.
    /// Returns `None` for offsets of a day or more, or when the shifted year overflows.
    pub fn to_offset(&self, offset_secs: i32) -> Option<Self> {
        if offset_secs.unsigned_abs() > MAX_OFFSET_SECS as u32 {
            return None;
        }
        let local = self.to_epoch_secs().checked_add(offset_secs as i64)?;
        let mut ct = epoch_to_date(local)?;
        ct.nanosecond = self.nanosecond;
        ct.offset = offset_secs;
        Some(ct)
    }

    /// Constructs a CalendarTime from Unix epoch seconds (negative values are before 1970).
    pub fn from_epoch(secs: i64) -> Option<Self> {
        epoch_to_date(secs)
    }

    /// Constructs from total nanoseconds since Unix epoch.
    pub fn from_epoch_nanos(nanos: i128) -> Option<Self> {
        let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC)).ok()?;
        let sub_nanos = nanos.rem_euclid(NANOS_PER_SEC) as u32;
        let mut ct = epoch_to_date(secs)?;
        ct.nanosecond = sub_nanos;
        Some(ct)
    }

    /// Converts back to Unix epoch seconds, dropping the nanosecond field.
    pub fn to_epoch_secs(&self) -> i64 {
        self.local_epoch_secs() - self.offset as i64
    }

    /// Seconds since 1970-01-01T00:00:00 read off the local fields, ignoring the offset.
    /// Reverse of `epoch_to_date` using Hinnant's `days_from_civil` algorithm.
    fn local_epoch_secs(&self) -> i64 {
        let y = if self.month <= 2 {
            self.year as i64 - 1
        } else {
            self.year as i64
        };
        let era = if y >= 0 { y } else { y - 399 } / 400;
        let yoe = (y - era * 400) as u32;
        let m = self.month as u32;
        let d = self.day as u32;
        let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        let days = era * 146097 + doe as i64 - 719468;
        days * SECS_PER_DAY
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64
    }

    /// Returns total nanoseconds since Unix epoch.
    pub fn to_epoch_nanos(&self) -> i128 {
        self.to_epoch_secs() as i128 * NANOS_PER_SEC + self.nanosecond as i128
    }

    /// Returns the signed difference in seconds between self and other.
    /// Positive means self is after other; negative means self is before.
    pub fn diff_secs(&self, other: &CalendarTime) -> i64 {
        self.to_epoch_secs() - other.to_epoch_secs()
    }

    /// Signed difference in nanoseconds (self - other).
    pub fn diff_nanos(&self, other: &CalendarTime) -> i128 {
        self.to_epoch_nanos() - other.to_epoch_nanos()
    }

    /// Formats as RFC 3339, e.g. "2019-09-21T23:56:59Z" or "2019-09-21T16:56:59-07:00".
    ///
    /// Years before 0 carry a leading minus sign; all years are at least four digits.
    pub fn rfc3339(&self) -> String {
        let year = if self.year < 0 {
            format!("-{:04}", self.year.unsigned_abs())
        } else {
            format!("{:04}", self.year)
        };
        let zone = if self.offset == 0 {
            "Z".to_string()
        } else {
            let sign = if self.offset < 0 { '-' } else { '+' };
            let abs = self.offset.unsigned_abs();
            format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
        };
        format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}{}",
            year, self.month, self.day, self.hour, self.minute, self.second, zone
        )
    }
}

impl PartialOrd for CalendarTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_epoch_nanos()
            .cmp(&other.to_epoch_nanos())
            .then(self.offset.cmp(&other.offset))
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rfc3339())
    }
}
