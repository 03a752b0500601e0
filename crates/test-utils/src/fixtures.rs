//! Common test fixtures for sdo-client tests.

use chrono::{NaiveDate, NaiveDateTime};

/// Common time values for testing.
pub mod time {
    /// Quarter-hour keys expected for the reference hour with limit 4
    pub const QUARTER_HOUR_KEYS: [&str; 4] = [
        "2021-01-01T00:00:00",
        "2021-01-01T00:15:00",
        "2021-01-01T00:30:00",
        "2021-01-01T00:45:00",
    ];
}

/// Common request values for testing.
pub mod values {
    /// A valid wavelength
    pub const WAVE: &str = "171";

    /// A valid image size
    pub const SIZE: &str = "512";

    /// Not a member of any enumeration
    pub const BOGUS: &str = "bogus";
}

/// Build a timestamp on 2021-01-01.
///
/// # Panics
///
/// Panics on an out of range hour, minute or second.
pub fn jan1(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, 1)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .expect("valid test time")
}

/// `(start, end)` of the reference hour.
pub fn reference_hour() -> (NaiveDateTime, NaiveDateTime) {
    (jan1(0, 0, 0), jan1(1, 0, 0))
}
