// src/domain/search.rs

use chrono::{Datelike, FixedOffset};

use super::complaint::Complaint;
use super::customer::Customer;

fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Case-insensitive equality, used to match complaint names against customers.
pub fn same_name(a: &str, b: &str) -> bool {
    fold(a.trim()) == fold(b.trim())
}

/// Generic stable substring filter. A blank term keeps everything.
fn filter_by<'a, T, F>(items: &'a [T], term: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<Option<&str>>,
{
    let needle = fold(term.trim());
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|&item| {
            fields(item)
                .into_iter()
                .flatten()
                .any(|field| fold(field).contains(&needle))
        })
        .collect()
}

/// Customers whose name contains `term`, ignoring case, in input order.
pub fn search<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    filter_by(customers, term, |c| vec![Some(c.name.as_str())])
}

/// Same contract as `search`, over name, phone, area and service.
pub fn search_any<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    filter_by(customers, term, |c| {
        vec![
            Some(c.name.as_str()),
            Some(c.phone.as_str()),
            c.area.as_deref(),
            c.service.as_deref(),
        ]
    })
}

pub fn search_complaints<'a>(complaints: &'a [Complaint], term: &str) -> Vec<&'a Complaint> {
    filter_by(complaints, term, |c| {
        vec![Some(c.customer_name.as_str()), Some(c.subject.as_str())]
    })
}

/// Customers created in the given month (1-12) of `year`, on the calendar of `offset`.
pub fn created_in_month(
    customers: &[Customer],
    year: i32,
    month: u32,
    offset: FixedOffset,
) -> Vec<&Customer> {
    customers
        .iter()
        .filter(|c| {
            let day = c.created_at.with_timezone(&offset).date_naive();
            day.year() == year && day.month() == month
        })
        .collect()
}
