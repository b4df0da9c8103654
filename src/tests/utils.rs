// src/tests/utils.rs
use crate::auth::sessions::create_session;
use crate::config::AppConfig;
use crate::db::auth::get_or_create_operator;
use crate::db::connection::{init_db, Database};
use crate::domain::clock::{Clock, FixedClock};
use crate::router::{handle, AppState};
use astra::{Body, Response};
use chrono::{NaiveDate, Offset, Utc};
use http::{Method, Request};
use std::io::Read;
use std::sync::Arc;
use tempfile::TempDir;

pub const OPERATOR: &str = "owner@shop.com";

/// Every router test runs on 2025-04-09.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()
}

/// Fresh database in a temp dir. Keep the `TempDir` alive for the test's duration.
pub fn test_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.sqlite3").to_string_lossy().to_string();

    let mut config = AppConfig::with_database(path.clone());
    config.operator_emails = vec![OPERATOR.to_string()];
    config.echo_magic_links = true;

    let db = Database::new(path);
    init_db(&db).expect("Database initialization failed");

    let state = AppState {
        db,
        clock: Arc::new(FixedClock::at_date(today(), Utc.fix())),
        config,
    };
    (dir, state)
}

/// A live session token for the test operator.
pub fn sign_in(state: &AppState) -> String {
    let now = state.clock.unix_now();
    let ttl = state.config.session_ttl_secs;
    state
        .db
        .with_conn(|conn| {
            let operator_id = get_or_create_operator(conn, OPERATOR, now)?;
            create_session(conn, operator_id, now, ttl)
        })
        .unwrap()
}

pub fn request(
    method: Method,
    uri: &str,
    session: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = session {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    if let Some(ct) = content_type {
        builder = builder.header("Content-Type", ct);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(state: &AppState, uri: &str, session: Option<&str>) -> Response {
    handle(request(Method::GET, uri, session, None, ""), state).expect("Failed to handle request")
}

pub fn post_form(state: &AppState, uri: &str, session: &str, form: &str) -> Response {
    let req = request(
        Method::POST,
        uri,
        Some(session),
        Some("application/x-www-form-urlencoded"),
        form,
    );
    handle(req, state).expect("Failed to handle request")
}

pub fn send_json(
    state: &AppState,
    method: Method,
    uri: &str,
    session: &str,
    json: serde_json::Value,
) -> Response {
    let req = request(
        method,
        uri,
        Some(session),
        Some("application/json"),
        &json.to_string(),
    );
    handle(req, state).expect("Failed to handle request")
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
