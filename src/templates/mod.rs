pub mod components;
pub mod layouts;
pub mod pages;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

pub use layouts::desktop::desktop_layout;

/// Dates are shown day-first, e.g. 09/04/2025.
pub fn fmt_day(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn fmt_timestamp(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    fmt_day(ts.with_timezone(&offset).date_naive())
}
