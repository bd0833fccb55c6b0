//! Timestamp formatting shared by every table.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Storage format for `created_at` / `updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage format for `visit_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats `at` as a second-precision UTC stamp without a zone suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time in storage format.
pub fn utc_now() -> String {
    format_timestamp(Utc::now())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date on the local calendar, used for visits entered without one.
pub fn today() -> String {
    format_date(Local::now().date_naive())
}
