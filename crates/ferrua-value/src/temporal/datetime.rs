//! Protocol timestamps.
//!
//! A `DateTime` counts 100-nanosecond ticks since 1601-01-01 00:00:00 UTC.
//! Negative ticks are valid and reach back before the epoch; all calendar
//! splitting uses euclidean division so the sub-second fields stay
//! non-negative either side of tick zero.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Datelike, Timelike, Utc};

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::impl_builtin_scalar;

/// Seconds between 1601-01-01 and the Unix epoch.
pub const UNIX_EPOCH_BIAS_SECS: i64 = 11_644_473_600;

/// 100-nanosecond ticks per second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// A timestamp in 100-nanosecond ticks since 1601-01-01 00:00:00 UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(i64);

impl DateTime {
    /// Construct from a raw tick count.
    #[inline]
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// The raw tick count.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// The current wall-clock time.
    ///
    /// A system clock before the Unix epoch collapses to the Unix epoch
    /// rather than failing.
    #[must_use]
    pub fn now() -> Self {
        let since_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let secs = since_unix.as_secs() as i64 + UNIX_EPOCH_BIAS_SECS;
        Self(secs * TICKS_PER_SECOND + i64::from(since_unix.subsec_micros()) * 10)
    }

    /// Split into calendar fields.
    #[must_use]
    pub fn to_calendar(self) -> CalendarTime {
        let t = self.0;
        let nano = (t.rem_euclid(10) * 100) as u16;
        let micro = (t.rem_euclid(10_000) / 10) as u16;
        let milli = (t.rem_euclid(TICKS_PER_SECOND) / 10_000) as u16;
        let unix_secs = t.div_euclid(TICKS_PER_SECOND) - UNIX_EPOCH_BIAS_SECS;

        // Tick counts fit well inside chrono's representable range.
        let utc = chrono::DateTime::<Utc>::from_timestamp(unix_secs, 0)
            .expect("whole-second timestamp is always representable");

        CalendarTime {
            year: utc.year(),
            month: utc.month() as u8,
            day: utc.day() as u8,
            hour: utc.hour() as u8,
            minute: utc.minute() as u8,
            second: utc.second() as u8,
            milli,
            micro,
            nano,
        }
    }
}

/// Calendar decomposition of a [`DateTime`], UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Milliseconds, 0..=999.
    pub milli: u16,
    /// Microseconds within the millisecond, 0..=999.
    pub micro: u16,
    /// Nanoseconds within the microsecond; tick granularity limits this to
    /// multiples of 100.
    pub nano: u16,
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.to_calendar();
        write!(
            f,
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}.{:03}.{:03}.{:03}",
            c.month, c.day, c.year, c.hour, c.minute, c.second, c.milli, c.micro, c.nano
        )
    }
}

impl_builtin_scalar! {
    DateTime => DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_zero_is_the_1601_epoch() {
        let c = DateTime::from_ticks(0).to_calendar();
        assert_eq!((c.year, c.month, c.day), (1601, 1, 1));
        assert_eq!((c.hour, c.minute, c.second), (0, 0, 0));
        assert_eq!((c.milli, c.micro, c.nano), (0, 0, 0));
    }

    #[test]
    fn bias_lands_on_the_unix_epoch() {
        let dt = DateTime::from_ticks(UNIX_EPOCH_BIAS_SECS * TICKS_PER_SECOND);
        let c = dt.to_calendar();
        assert_eq!((c.year, c.month, c.day), (1970, 1, 1));
        assert_eq!((c.hour, c.minute, c.second), (0, 0, 0));
    }

    #[test]
    fn sub_second_fields_split_per_digit_group() {
        let c = DateTime::from_ticks(1_234_567).to_calendar();
        assert_eq!(c.milli, 123);
        assert_eq!(c.micro, 456);
        assert_eq!(c.nano, 700);
    }

    #[test]
    fn negative_ticks_reach_before_the_epoch() {
        let c = DateTime::from_ticks(-TICKS_PER_SECOND).to_calendar();
        assert_eq!((c.year, c.month, c.day), (1600, 12, 31));
        assert_eq!((c.hour, c.minute, c.second), (23, 59, 59));
        assert_eq!(c.milli, 0);
    }

    #[test]
    fn display_uses_month_day_year_with_split_fractions() {
        let dt = DateTime::from_ticks(UNIX_EPOCH_BIAS_SECS * TICKS_PER_SECOND + 1_234_567);
        assert_eq!(dt.to_string(), "01/01/1970 00:00:00.123.456.700");
    }

    #[test]
    fn now_is_after_2020() {
        let c = DateTime::now().to_calendar();
        assert!(c.year >= 2020);
    }

    #[test]
    fn copy_and_equality_are_bitwise() {
        let dt = DateTime::from_ticks(99);
        assert_eq!(dt.deep_copy().unwrap(), dt);
        assert_ne!(dt, DateTime::from_ticks(100));
    }
}
