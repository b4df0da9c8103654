// src/handlers/api.rs
//! JSON endpoints. Field names are camelCase; errors are `{"message": ...}`.
use crate::db::DataStore;
use crate::domain::complaint::{ComplaintStatus, NewComplaint};
use crate::domain::customer::{Customer, CustomerPatch, FollowUpStatus, NewCustomer};
use crate::domain::expiry::{in_bucket, ExpiryAssessment, ExpiryBucket};
use crate::domain::follow_up;
use crate::domain::search::{search, search_complaints};
use crate::errors::{ResultResp, ServerError};
use crate::forms::{self, Params};
use crate::handlers::{dashboard_stats, Ctx};
use crate::responses::{json_response, json_status_response};
use astra::Request;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

fn read_json<T: serde::de::DeserializeOwned>(req: Request) -> Result<T, ServerError> {
    forms::parse_json(&forms::read_body(req.into_body())?)
}

fn found(customer: Option<Customer>) -> Result<Customer, ServerError> {
    customer.ok_or_else(|| ServerError::not_found("Customer"))
}

// ---- customers ----

pub fn list_customers(ctx: &Ctx, query: &Params) -> ResultResp {
    let all = ctx.state.db.list_customers()?;
    match forms::field(query, "search") {
        Some(term) => json_response(&search(&all, &term)),
        None => json_response(&all),
    }
}

pub fn search_customers(ctx: &Ctx, name: &str) -> ResultResp {
    let all = ctx.state.db.list_customers()?;
    json_response(&search(&all, name))
}

pub fn get_customer(ctx: &Ctx, id: i64) -> ResultResp {
    json_response(&found(ctx.state.db.get_customer(id)?)?)
}

pub fn create_customer(ctx: &Ctx, req: Request) -> ResultResp {
    let new: NewCustomer = read_json(req)?;
    let customer = ctx.state.db.create_customer(new, ctx.now())?;
    info!(customer_id = customer.id, "customer added");
    json_status_response(201, &customer)
}

/// Partial update. A `followUpStatus` of `completed` is treated as a renewal.
pub fn update_customer(ctx: &Ctx, id: i64, req: Request) -> ResultResp {
    let patch: CustomerPatch = read_json(req)?;
    let patch = follow_up::normalize_patch(patch, ctx.state.clock.today());
    let customer = ctx.state.db.update_customer(id, &patch)?;
    info!(customer_id = id, "customer updated");
    json_response(&customer)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusChange {
    #[serde(alias = "status")]
    follow_up_status: String,
}

pub fn set_customer_status(ctx: &Ctx, id: i64, req: Request) -> ResultResp {
    let change: StatusChange = read_json(req)?;
    let requested = FollowUpStatus::parse(&change.follow_up_status)?;
    let customer = follow_up::set_status(&ctx.state.db, id, requested, ctx.state.clock.today())?;
    json_response(&customer)
}

pub fn delete_customer(ctx: &Ctx, id: i64) -> ResultResp {
    let archived = ctx.state.db.archive_and_delete_customer(id, ctx.now())?;
    info!(
        customer_id = id,
        bin_id = archived.id,
        operator_id = ctx.operator.id,
        "customer moved to bin"
    );
    json_response(&json!({ "message": "Customer moved to bin", "deleted": archived }))
}

// ---- follow-ups ----

#[derive(Serialize)]
struct FollowUpRow<'a> {
    #[serde(flatten)]
    customer: &'a Customer,
    #[serde(flatten)]
    assessment: ExpiryAssessment,
}

pub fn follow_ups(ctx: &Ctx, bucket: ExpiryBucket) -> ResultResp {
    let all = ctx.state.db.list_customers()?;
    let today = ctx.state.clock.today();
    let rows: Vec<FollowUpRow> = in_bucket(&all, bucket, today, ctx.state.clock.offset())
        .into_iter()
        .map(|(customer, assessment)| FollowUpRow {
            customer,
            assessment,
        })
        .collect();
    json_response(&rows)
}

pub fn dashboard(ctx: &Ctx) -> ResultResp {
    json_response(&dashboard_stats(ctx.state)?)
}

pub fn bin(ctx: &Ctx) -> ResultResp {
    json_response(&ctx.state.db.list_deleted_customers()?)
}

// ---- complaints ----

pub fn list_complaints(ctx: &Ctx, query: &Params) -> ResultResp {
    let all = ctx.state.db.list_complaints()?;
    let term = forms::field(query, "search").unwrap_or_default();
    json_response(&search_complaints(&all, &term))
}

pub fn create_complaint(ctx: &Ctx, req: Request) -> ResultResp {
    let new: NewComplaint = read_json(req)?;
    let complaint = ctx.state.db.create_complaint(new, ctx.now())?;
    info!(complaint_id = complaint.id, "complaint logged");
    json_status_response(201, &complaint)
}

#[derive(Debug, Deserialize)]
struct ComplaintChange {
    status: String,
}

pub fn update_complaint(ctx: &Ctx, id: i64, req: Request) -> ResultResp {
    let change: ComplaintChange = read_json(req)?;
    let status = ComplaintStatus::parse(&change.status)?;
    let complaint = ctx.state.db.update_complaint_status(id, status)?;
    info!(complaint_id = id, status = status.as_str(), "complaint status changed");
    json_response(&complaint)
}

pub fn delete_complaint(ctx: &Ctx, id: i64) -> ResultResp {
    ctx.state.db.delete_complaint(id)?;
    info!(complaint_id = id, "complaint deleted");
    json_response(&json!({ "message": "Complaint deleted" }))
}
