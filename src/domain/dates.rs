// src/domain/dates.rs

use chrono::{FixedOffset, Months, NaiveDate};

use super::customer::Customer;

/// Parses a `YYYY-MM-DD` calendar date. Anything after a `T` or a space
/// (a time of day) is ignored. Malformed input yields `None`; callers fall back.
pub fn parse_calendar_date(input: Option<&str>) -> Option<NaiveDate> {
    let raw = input?.trim();
    let day_part = raw.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

/// The day the current service period started: the explicit service date when it
/// parses, otherwise the calendar day the record was created on (in `offset`).
pub fn resolve_service_start(customer: &Customer, offset: FixedOffset) -> NaiveDate {
    parse_calendar_date(customer.service_date.as_deref())
        .unwrap_or_else(|| customer.created_at.with_timezone(&offset).date_naive())
}

/// Renewal period in months: the leading digits of the stored value,
/// `0` when absent or not a number.
pub fn service_months(service: Option<&str>) -> u32 {
    let Some(raw) = service else {
        return 0;
    };
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Adds calendar months. A day that doesn't exist in the target month is
/// clamped to that month's last day (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Signed number of days from `a` to `b`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

pub fn expiry_date(customer: &Customer, offset: FixedOffset) -> NaiveDate {
    add_months(
        resolve_service_start(customer, offset),
        service_months(customer.service.as_deref()),
    )
}
