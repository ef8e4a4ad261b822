//! Temporal built-in types.

pub mod datetime;

pub use datetime::{CalendarTime, DateTime, TICKS_PER_SECOND, UNIX_EPOCH_BIAS_SECS};
