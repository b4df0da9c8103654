// src/handlers/pages.rs
//! HTML pages and form posts for signed-in operators.
use crate::db::DataStore;
use crate::domain::complaint::{ComplaintStatus, NewComplaint};
use crate::domain::customer::{CustomerPatch, FollowUpStatus, NewCustomer};
use crate::domain::expiry::{assess, in_bucket, ExpiryBucket};
use crate::domain::follow_up;
use crate::domain::search::{created_in_month, search_any, search_complaints};
use crate::errors::{ResultResp, ServerError};
use crate::forms::{self, Params};
use crate::handlers::{dashboard_stats, Ctx};
use crate::responses::{html_response, html_status_response, redirect};
use crate::spreadsheets::export_follow_ups_xlsx;
use crate::templates::pages::{
    bin_page, complaints_page, customer_detail_page, customer_form_page, customers_page,
    dashboard_page, follow_ups_page, month_customers_page, new_complaint_page, CustomerFormVm,
    DashboardVm,
};
use astra::Request;
use chrono::Datelike;
use http::header::REFERER;
use http::HeaderMap;
use tracing::info;

/// Where to go after a small form post: back to the page it came from.
fn back_to(headers: &HeaderMap, fallback: &str) -> String {
    headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|r| url::Url::parse(r).ok())
        .map(|u| match u.query() {
            Some(q) => format!("{}?{}", u.path(), q),
            None => u.path().to_string(),
        })
        .unwrap_or_else(|| fallback.to_string())
}

fn read_form(req: Request) -> Result<Params, ServerError> {
    Ok(forms::parse_form(&forms::read_body(req.into_body())?))
}

fn raw(params: &Params, name: &str) -> Option<String> {
    params.get(name).map(|v| v.trim().to_string())
}

pub fn dashboard(ctx: &Ctx) -> ResultResp {
    let stats = dashboard_stats(ctx.state)?;
    html_response(dashboard_page(&DashboardVm {
        operator: ctx.operator.email.clone(),
        total_customers: stats.total_customers,
        new_this_month: stats.new_this_month,
        summary: stats.follow_ups,
        pending_complaints: stats.pending_complaints,
    }))
}

// ---- customers ----

pub fn customers(ctx: &Ctx, query: &Params) -> ResultResp {
    let all = ctx.state.db.list_customers()?;
    let q = forms::field(query, "q").unwrap_or_default();
    let shown = search_any(&all, &q);
    html_response(customers_page(
        &ctx.operator.email,
        &shown,
        &q,
        ctx.state.clock.offset(),
    ))
}

pub fn month_customers(ctx: &Ctx, query: &Params) -> ResultResp {
    let today = ctx.state.clock.today();
    let year = forms::field(query, "year")
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(today.year());
    let month = forms::field(query, "month")
        .and_then(|m| m.parse::<u32>().ok())
        .filter(|m| (1..=12).contains(m))
        .unwrap_or(today.month());

    let all = ctx.state.db.list_customers()?;
    let offset = ctx.state.clock.offset();
    let shown = created_in_month(&all, year, month, offset);
    html_response(month_customers_page(
        &ctx.operator.email,
        year,
        month,
        &shown,
        offset,
    ))
}

pub fn new_customer(ctx: &Ctx) -> ResultResp {
    html_response(customer_form_page(
        &ctx.operator.email,
        None,
        &CustomerFormVm::default(),
        None,
    ))
}

pub fn create_customer(ctx: &Ctx, req: Request) -> ResultResp {
    let params = read_form(req)?;
    let new = NewCustomer {
        name: raw(&params, "name").unwrap_or_default(),
        phone: raw(&params, "phone").unwrap_or_default(),
        email: raw(&params, "email"),
        address: raw(&params, "address"),
        area: raw(&params, "area"),
        service: raw(&params, "service"),
        brand: raw(&params, "brand"),
        service_date: raw(&params, "serviceDate"),
    };

    match ctx.state.db.create_customer(new, ctx.now()) {
        Ok(customer) => {
            info!(customer_id = customer.id, "customer added");
            redirect(&format!("/customers/{}", customer.id))
        }
        Err(ServerError::Validation(msg)) => {
            let vm = form_vm(&params);
            html_status_response(
                400,
                customer_form_page(&ctx.operator.email, None, &vm, Some(&msg)),
            )
        }
        Err(e) => Err(e),
    }
}

fn form_vm(params: &Params) -> CustomerFormVm {
    let v = |name: &str| raw(params, name).unwrap_or_default();
    CustomerFormVm {
        name: v("name"),
        phone: v("phone"),
        email: v("email"),
        address: v("address"),
        area: v("area"),
        service: v("service"),
        brand: v("brand"),
        service_date: v("serviceDate"),
    }
}

pub fn customer_detail(ctx: &Ctx, id: i64) -> ResultResp {
    let customer = ctx
        .state
        .db
        .get_customer(id)?
        .ok_or_else(|| ServerError::not_found("Customer"))?;
    let offset = ctx.state.clock.offset();
    let assessment = assess(&customer, ctx.state.clock.today(), offset);
    html_response(customer_detail_page(
        &ctx.operator.email,
        &customer,
        &assessment,
        offset,
    ))
}

pub fn edit_customer(ctx: &Ctx, id: i64) -> ResultResp {
    let customer = ctx
        .state
        .db
        .get_customer(id)?
        .ok_or_else(|| ServerError::not_found("Customer"))?;
    html_response(customer_form_page(
        &ctx.operator.email,
        Some(id),
        &CustomerFormVm::from(&customer),
        None,
    ))
}

/// Edit form post. Blank optional fields clear the stored value.
pub fn update_customer(ctx: &Ctx, id: i64, req: Request) -> ResultResp {
    let params = read_form(req)?;
    let patch = CustomerPatch {
        name: raw(&params, "name"),
        phone: raw(&params, "phone"),
        email: raw(&params, "email"),
        address: raw(&params, "address"),
        area: raw(&params, "area"),
        service: raw(&params, "service"),
        brand: raw(&params, "brand"),
        service_date: raw(&params, "serviceDate"),
        follow_up_status: None,
    };

    match ctx.state.db.update_customer(id, &patch) {
        Ok(_) => {
            info!(customer_id = id, "customer updated");
            redirect(&format!("/customers/{id}"))
        }
        Err(ServerError::Validation(msg)) => html_status_response(
            400,
            customer_form_page(&ctx.operator.email, Some(id), &form_vm(&params), Some(&msg)),
        ),
        Err(e) => Err(e),
    }
}

pub fn set_customer_status(ctx: &Ctx, id: i64, req: Request) -> ResultResp {
    let fallback = format!("/customers/{id}");
    let back = back_to(req.headers(), &fallback);
    let params = read_form(req)?;
    let requested = FollowUpStatus::parse(&forms::required(&params, "followUpStatus")?)?;

    follow_up::set_status(&ctx.state.db, id, requested, ctx.state.clock.today())?;
    redirect(&back)
}

pub fn delete_customer(ctx: &Ctx, id: i64) -> ResultResp {
    let archived = ctx.state.db.archive_and_delete_customer(id, ctx.now())?;
    info!(
        customer_id = id,
        bin_id = archived.id,
        operator_id = ctx.operator.id,
        "customer moved to bin"
    );
    redirect("/customers")
}

// ---- follow-ups ----

pub fn follow_ups(ctx: &Ctx, bucket: ExpiryBucket) -> ResultResp {
    let all = ctx.state.db.list_customers()?;
    let rows = in_bucket(&all, bucket, ctx.state.clock.today(), ctx.state.clock.offset());
    html_response(follow_ups_page(&ctx.operator.email, bucket, &rows))
}

pub fn export_follow_ups(ctx: &Ctx, query: &Params) -> ResultResp {
    let bucket = match forms::field(query, "bucket").as_deref() {
        Some("upcoming") => ExpiryBucket::Upcoming,
        Some("overdue") => ExpiryBucket::Overdue,
        _ => {
            return Err(ServerError::Validation(
                "bucket must be upcoming or overdue".into(),
            ))
        }
    };

    let today = ctx.state.clock.today();
    let all = ctx.state.db.list_customers()?;
    let rows = in_bucket(&all, bucket, today, ctx.state.clock.offset());
    info!(bucket = bucket.label(), rows = rows.len(), "follow-up list exported");
    export_follow_ups_xlsx(&rows, bucket, today)
}

// ---- complaints ----

pub fn complaints(ctx: &Ctx, query: &Params) -> ResultResp {
    let all = ctx.state.db.list_complaints()?;
    let q = forms::field(query, "q").unwrap_or_default();
    let shown = search_complaints(&all, &q);
    html_response(complaints_page(
        &ctx.operator.email,
        &shown,
        &q,
        ctx.state.clock.offset(),
    ))
}

fn customer_names(ctx: &Ctx) -> Result<Vec<String>, ServerError> {
    Ok(ctx
        .state
        .db
        .list_customers()?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

pub fn new_complaint(ctx: &Ctx) -> ResultResp {
    html_response(new_complaint_page(
        &ctx.operator.email,
        &customer_names(ctx)?,
        None,
    ))
}

pub fn create_complaint(ctx: &Ctx, req: Request) -> ResultResp {
    let params = read_form(req)?;
    let new = NewComplaint {
        customer_name: raw(&params, "customerName").unwrap_or_default(),
        subject: raw(&params, "subject").unwrap_or_default(),
        body: raw(&params, "body").unwrap_or_default(),
    };

    match ctx.state.db.create_complaint(new, ctx.now()) {
        Ok(complaint) => {
            info!(complaint_id = complaint.id, "complaint logged");
            redirect("/complaints")
        }
        Err(ServerError::Validation(msg)) => html_status_response(
            400,
            new_complaint_page(&ctx.operator.email, &customer_names(ctx)?, Some(&msg)),
        ),
        Err(e) => Err(e),
    }
}

pub fn set_complaint_status(ctx: &Ctx, id: i64, req: Request) -> ResultResp {
    let params = read_form(req)?;
    let status = ComplaintStatus::parse(&forms::required(&params, "status")?)?;
    ctx.state.db.update_complaint_status(id, status)?;
    info!(complaint_id = id, status = status.as_str(), "complaint status changed");
    redirect("/complaints")
}

pub fn delete_complaint(ctx: &Ctx, id: i64) -> ResultResp {
    ctx.state.db.delete_complaint(id)?;
    info!(complaint_id = id, "complaint deleted");
    redirect("/complaints")
}

// ---- bin ----

pub fn bin(ctx: &Ctx) -> ResultResp {
    let deleted = ctx.state.db.list_deleted_customers()?;
    html_response(bin_page(
        &ctx.operator.email,
        &deleted,
        ctx.state.clock.offset(),
    ))
}
