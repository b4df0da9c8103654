// src/domain/clock.rs
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Source of "now" for everything date-dependent.
/// Date math and classification take `today` as an argument and never read this directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Offset used to turn instants into calendar days.
    fn offset(&self) -> FixedOffset;

    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.offset()).date_naive()
    }

    fn unix_now(&self) -> i64 {
        self.now().timestamp()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// A clock frozen at one instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

#[cfg(test)]
impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Noon UTC on the given day, which is the same calendar day for any offset within ±11h.
    pub fn at_date(date: NaiveDate, offset: FixedOffset) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self::new(noon, offset)
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
