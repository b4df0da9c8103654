use crate::config::AppConfig;
use crate::db::Database;
use crate::domain::clock::Clock;
use crate::domain::expiry::ExpiryBucket;
use crate::errors::{ResultResp, ServerError};
use crate::forms;
use crate::handlers::{api, auth, pages, parse_id, Ctx};
use crate::responses::{css_response, html_error_response, json_error_response, redirect};
use astra::Request;
use std::sync::Arc;
use tracing::debug;

const MAIN_CSS: &str = include_str!("../static/main.css");

/// Shared by every worker thread.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
    pub clock: Arc<dyn Clock>,
}

/// Routes a request. Errors become an HTML page, or a JSON body under `/api/`.
pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let is_api = req.uri().path().starts_with("/api/");
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match route(req, state) {
        Ok(resp) => Ok(resp),
        Err(err) => {
            debug!(%method, %path, error = %err, "request failed");
            if is_api {
                Ok(json_error_response(err))
            } else {
                Ok(html_error_response(err))
            }
        }
    }
}

fn route(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = forms::parse_query(req.uri().query());
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    // Sign-in flow is open to everyone.
    match (method.as_str(), segments.as_slice()) {
        ("GET", ["static", "main.css"]) => return css_response(MAIN_CSS),
        ("GET", ["login"]) => return auth::login(state, req.headers()),
        ("POST", ["auth", "request-link"]) => return auth::request_link(req, state),
        ("GET", ["auth", "magic"]) => return auth::redeem(state, &query),
        ("POST", ["logout"]) => return auth::logout(state, req.headers()),
        _ => {}
    }

    let Some(operator) = auth::current_operator(state, req.headers())? else {
        return match segments.first() {
            Some(&"api") => Err(ServerError::Unauthorized("sign in required".into())),
            _ => redirect("/login"),
        };
    };
    let ctx = Ctx { state, operator };

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => redirect("/dashboard"),
        ("GET", ["dashboard"]) => pages::dashboard(&ctx),

        ("GET", ["customers"]) => pages::customers(&ctx, &query),
        ("POST", ["customers"]) => pages::create_customer(&ctx, req),
        ("GET", ["customers", "new"]) => pages::new_customer(&ctx),
        ("GET", ["customers", "month"]) => pages::month_customers(&ctx, &query),
        ("GET", ["customers", id]) => pages::customer_detail(&ctx, parse_id(id, "Customer")?),
        ("POST", ["customers", id]) => {
            pages::update_customer(&ctx, parse_id(id, "Customer")?, req)
        }
        ("GET", ["customers", id, "edit"]) => {
            pages::edit_customer(&ctx, parse_id(id, "Customer")?)
        }
        ("POST", ["customers", id, "status"]) => {
            pages::set_customer_status(&ctx, parse_id(id, "Customer")?, req)
        }
        ("POST", ["customers", id, "delete"]) => {
            pages::delete_customer(&ctx, parse_id(id, "Customer")?)
        }

        ("GET", ["follow-ups", "upcoming"]) => pages::follow_ups(&ctx, ExpiryBucket::Upcoming),
        ("GET", ["follow-ups", "overdue"]) => pages::follow_ups(&ctx, ExpiryBucket::Overdue),
        ("GET", ["follow-ups", "export"]) => pages::export_follow_ups(&ctx, &query),

        ("GET", ["complaints"]) => pages::complaints(&ctx, &query),
        ("POST", ["complaints"]) => pages::create_complaint(&ctx, req),
        ("GET", ["complaints", "new"]) => pages::new_complaint(&ctx),
        ("POST", ["complaints", id, "status"]) => {
            pages::set_complaint_status(&ctx, parse_id(id, "Complaint")?, req)
        }
        ("POST", ["complaints", id, "delete"]) => {
            pages::delete_complaint(&ctx, parse_id(id, "Complaint")?)
        }

        ("GET", ["bin"]) => pages::bin(&ctx),

        // JSON
        ("GET", ["api", "customers"]) => api::list_customers(&ctx, &query),
        ("POST", ["api", "customers"]) => api::create_customer(&ctx, req),
        ("GET", ["api", "customers", "search", name]) => {
            api::search_customers(&ctx, &forms::decode_segment(name))
        }
        ("GET", ["api", "customers", id]) => api::get_customer(&ctx, parse_id(id, "Customer")?),
        ("PUT", ["api", "customers", id]) => {
            api::update_customer(&ctx, parse_id(id, "Customer")?, req)
        }
        ("DELETE", ["api", "customers", id]) => {
            api::delete_customer(&ctx, parse_id(id, "Customer")?)
        }
        ("PATCH", ["api", "customers", id, "status"]) => {
            api::set_customer_status(&ctx, parse_id(id, "Customer")?, req)
        }
        ("GET", ["api", "follow-ups", "upcoming"]) => {
            api::follow_ups(&ctx, ExpiryBucket::Upcoming)
        }
        ("GET", ["api", "follow-ups", "overdue"]) => api::follow_ups(&ctx, ExpiryBucket::Overdue),
        ("GET", ["api", "dashboard"]) => api::dashboard(&ctx),
        ("GET", ["api", "bin"]) => api::bin(&ctx),
        ("GET", ["api", "complaints"]) => api::list_complaints(&ctx, &query),
        ("POST", ["api", "complaints"]) => api::create_complaint(&ctx, req),
        ("PATCH", ["api", "complaints", id]) => {
            api::update_complaint(&ctx, parse_id(id, "Complaint")?, req)
        }
        ("DELETE", ["api", "complaints", id]) => {
            api::delete_complaint(&ctx, parse_id(id, "Complaint")?)
        }

        _ => Err(ServerError::not_found("Page")),
    }
}
