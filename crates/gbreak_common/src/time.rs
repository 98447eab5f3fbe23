//! Re-exports std::time, with a wall clock timestamp used for log messages
pub use std::time::*;

use core::fmt::Display;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// UTC wall clock time
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimeStamp {
    pub year        : i32,
    pub month       : u8,
    /// Sunday is 0
    pub day_of_week : u8,
    pub day         : u8,
    pub hour        : u8,
    pub minute      : u8,
    pub second      : u8,
    pub millisecond : u16,
}

impl TimeStamp {
    pub fn from_date_time(date_time: &DateTime<Utc>) -> Self {
        Self {
            year:        date_time.year(),
            month:       date_time.month() as u8,
            day_of_week: date_time.weekday().num_days_from_sunday() as u8,
            day:         date_time.day() as u8,
            hour:        date_time.hour() as u8,
            minute:      date_time.minute() as u8,
            second:      date_time.second() as u8,
            // Leap seconds are reported as millisecond 1000+
            millisecond: date_time.timestamp_subsec_millis().min(999) as u16,
        }
    }
}

impl Display for TimeStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}", self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond))
    }
}

/// Get the current UTC timestamp
pub fn get_timestamp() -> TimeStamp {
    TimeStamp::from_date_time(&Utc::now())
}
