// src/domain/expiry.rs

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use super::customer::{Customer, FollowUpStatus};
use super::dates::{days_between, expiry_date};

/// Days before expiry during which a customer is flagged as upcoming.
pub const EXPIRY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryBucket {
    NotDue,
    Upcoming,
    Overdue,
    Completed,
}

impl ExpiryBucket {
    pub fn label(self) -> &'static str {
        match self {
            ExpiryBucket::NotDue => "not-due",
            ExpiryBucket::Upcoming => "upcoming",
            ExpiryBucket::Overdue => "overdue",
            ExpiryBucket::Completed => "completed",
        }
    }
}

/// Classification of one customer on one day, with the numbers the views render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAssessment {
    pub bucket: ExpiryBucket,
    pub expiry_date: NaiveDate,
    /// Negative once the expiry date has passed.
    pub days_until_expiry: i64,
}

/// The order of checks matters: a completed follow-up is excluded from
/// every alert view before any date is looked at.
pub fn classify(customer: &Customer, today: NaiveDate, offset: FixedOffset) -> ExpiryBucket {
    assess(customer, today, offset).bucket
}

pub fn assess(customer: &Customer, today: NaiveDate, offset: FixedOffset) -> ExpiryAssessment {
    let expiry = expiry_date(customer, offset);
    let delta = days_between(today, expiry);

    let bucket = if customer.follow_up_status == FollowUpStatus::Completed {
        ExpiryBucket::Completed
    } else if delta < 0 {
        ExpiryBucket::Overdue
    } else if delta <= EXPIRY_WINDOW_DAYS {
        ExpiryBucket::Upcoming
    } else {
        ExpiryBucket::NotDue
    };

    ExpiryAssessment {
        bucket,
        expiry_date: expiry,
        days_until_expiry: delta,
    }
}

/// Customers in `bucket`, in input order, each with its assessment.
pub fn in_bucket<'a>(
    customers: &'a [Customer],
    bucket: ExpiryBucket,
    today: NaiveDate,
    offset: FixedOffset,
) -> Vec<(&'a Customer, ExpiryAssessment)> {
    customers
        .iter()
        .map(|c| (c, assess(c, today, offset)))
        .filter(|(_, a)| a.bucket == bucket)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpSummary {
    pub not_due: usize,
    pub upcoming: usize,
    pub overdue: usize,
    pub completed: usize,
}

impl FollowUpSummary {
    pub fn tally(customers: &[Customer], today: NaiveDate, offset: FixedOffset) -> Self {
        let mut summary = Self::default();
        for c in customers {
            match classify(c, today, offset) {
                ExpiryBucket::NotDue => summary.not_due += 1,
                ExpiryBucket::Upcoming => summary.upcoming += 1,
                ExpiryBucket::Overdue => summary.overdue += 1,
                ExpiryBucket::Completed => summary.completed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.not_due + self.upcoming + self.overdue + self.completed
    }
}
