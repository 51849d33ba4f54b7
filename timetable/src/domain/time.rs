//! Clock time of day for timetables.
//!
//! Timetables only ever deal with the time on a wall clock. A `TimeValue`
//! does not know which day it belongs to: arithmetic wraps around midnight
//! and the number of days crossed is discarded.

use chrono::{Local, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Minutes in a day; all arithmetic is modulo this.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

const MINUTES_PER_HOUR: i64 = 60;

/// A normalized hour/minute pair.
///
/// Construction never fails. Minute overflow carries into the hour and hour
/// overflow wraps around the day, so `TimeValue::new(25, 0)` is 01:00 and
/// `TimeValue::new(10, 75)` is 11:15. Stored files and derived arrival times
/// rely on this normalization.
///
/// Ordering is by hour, then minute.
///
/// # Examples
///
/// ```
/// use timetable::domain::TimeValue;
///
/// let t = TimeValue::new(23, 50);
/// assert_eq!(t.to_string(), "23:50");
///
/// // Crossing midnight wraps the clock
/// assert_eq!(t.add_minutes(20), TimeValue::new(0, 10));
///
/// // Out-of-range input is normalized, not rejected
/// assert_eq!(TimeValue::new(25, 0), TimeValue::new(1, 0));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeValue {
    hour: u8,
    minute: u8,
}

impl TimeValue {
    /// Midnight, 00:00.
    pub const MIDNIGHT: TimeValue = TimeValue { hour: 0, minute: 0 };

    /// Create a time, normalizing any overflow.
    pub fn new(hour: i64, minute: i64) -> Self {
        Self::from_minutes(hour * MINUTES_PER_HOUR + minute)
    }

    /// Create a time from minutes since midnight, wrapping around the day.
    pub fn from_minutes(total: i64) -> Self {
        let wrapped = total.rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (wrapped / MINUTES_PER_HOUR) as u8,
            minute: (wrapped % MINUTES_PER_HOUR) as u8,
        }
    }

    /// The current local wall-clock time, truncated to the minute.
    pub fn now() -> Self {
        Self::from(Local::now().time())
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// Minutes since midnight (0-1439).
    pub fn to_minutes(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Returns a new time `minutes` later, wrapping past midnight.
    ///
    /// Negative values move the clock backwards.
    pub fn add_minutes(&self, minutes: i64) -> Self {
        Self::from_minutes(i64::from(self.to_minutes()) + minutes)
    }
}

impl From<NaiveTime> for TimeValue {
    fn from(time: NaiveTime) -> Self {
        Self::new(i64::from(time.hour()), i64::from(time.minute()))
    }
}

impl fmt::Debug for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeValue({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_in_range() {
        let t = TimeValue::new(14, 30);
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.to_minutes(), 870);
    }

    #[test]
    fn minute_overflow_carries() {
        let t = TimeValue::new(10, 75);
        assert_eq!(t.hour(), 11);
        assert_eq!(t.minute(), 15);
    }

    #[test]
    fn hour_overflow_wraps() {
        assert_eq!(TimeValue::new(24, 0), TimeValue::MIDNIGHT);
        assert_eq!(TimeValue::new(25, 0), TimeValue::new(1, 0));
        assert_eq!(TimeValue::new(23, 120), TimeValue::new(1, 0));
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(TimeValue::new(6, 5).to_string(), "06:05");
        assert_eq!(TimeValue::new(0, 0).to_string(), "00:00");
        assert_eq!(TimeValue::new(23, 59).to_string(), "23:59");
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", TimeValue::new(7, 3)), "TimeValue(07:03)");
    }

    #[test]
    fn add_minutes_same_day() {
        assert_eq!(TimeValue::new(6, 0).add_minutes(15), TimeValue::new(6, 15));
        assert_eq!(TimeValue::new(6, 50).add_minutes(15), TimeValue::new(7, 5));
    }

    #[test]
    fn add_minutes_crosses_midnight() {
        assert_eq!(TimeValue::new(23, 30).add_minutes(45), TimeValue::new(0, 15));
        // Whole days are discarded
        assert_eq!(
            TimeValue::new(8, 0).add_minutes(3 * MINUTES_PER_DAY + 1),
            TimeValue::new(8, 1)
        );
    }

    #[test]
    fn add_negative_minutes() {
        assert_eq!(TimeValue::new(0, 10).add_minutes(-20), TimeValue::new(23, 50));
    }

    #[test]
    fn ordering() {
        assert!(TimeValue::new(9, 59) < TimeValue::new(10, 0));
        assert!(TimeValue::new(10, 1) > TimeValue::new(10, 0));
        assert_eq!(
            TimeValue::new(12, 0).cmp(&TimeValue::new(12, 0)),
            std::cmp::Ordering::Equal
        );
    }

    #[test]
    fn from_naive_time() {
        let t = NaiveTime::from_hms_opt(17, 42, 59).unwrap();
        assert_eq!(TimeValue::from(t), TimeValue::new(17, 42));
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&TimeValue::new(6, 15)).unwrap();
        assert_eq!(json, "\"06:15\"");
    }
}
