//! Wall-clock source for transaction stamps.
//!
//! Dates and times are rendered WITHOUT zero padding (`2025-1-5`, `9:3:5`).
//! The audit log compares date strings for equality when summing today's
//! withdrawals, so the same format must be used when writing and reading.

use chrono::{Datelike, Local, Timelike};

/// A local date and time, pre-rendered in the audit-log format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    /// `YYYY-M-D`, no padding.
    pub date: String,

    /// `H:M:S`, no padding.
    pub time: String,
}

impl Timestamp {
    /// Builds a timestamp from calendar fields.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Timestamp {
            date: format!("{}-{}-{}", year, month, day),
            time: format!("{}:{}:{}", hour, minute, second),
        }
    }
}

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// The real local-timezone clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let now = Local::now();
        Timestamp::new(
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
        )
    }
}
