// src/handlers/mod.rs
pub mod api;
pub mod auth;
pub mod pages;

use crate::auth::sessions::Operator;
use crate::db::DataStore;
use crate::domain::complaint::ComplaintStatus;
use crate::domain::expiry::FollowUpSummary;
use crate::domain::search::created_in_month;
use crate::errors::ServerError;
use crate::router::AppState;
use chrono::Datelike;
use serde::Serialize;

/// What every signed-in handler gets.
pub struct Ctx<'a> {
    pub state: &'a AppState,
    pub operator: Operator,
}

impl Ctx<'_> {
    pub fn now(&self) -> i64 {
        self.state.clock.unix_now()
    }
}

/// Dashboard numbers, shared by the page and the JSON endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: usize,
    pub new_this_month: usize,
    pub follow_ups: FollowUpSummary,
    pub pending_complaints: usize,
}

pub fn dashboard_stats(state: &AppState) -> Result<DashboardStats, ServerError> {
    let customers = state.db.list_customers()?;
    let complaints = state.db.list_complaints()?;
    let today = state.clock.today();
    let offset = state.clock.offset();

    Ok(DashboardStats {
        total_customers: customers.len(),
        new_this_month: created_in_month(&customers, today.year(), today.month(), offset).len(),
        follow_ups: FollowUpSummary::tally(&customers, today, offset),
        pending_complaints: complaints
            .iter()
            .filter(|c| c.status == ComplaintStatus::Pending)
            .count(),
    })
}

pub fn parse_id(raw: &str, what: &str) -> Result<i64, ServerError> {
    raw.parse::<i64>().map_err(|_| ServerError::not_found(what))
}
