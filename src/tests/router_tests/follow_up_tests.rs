use crate::db::DataStore;
use crate::domain::clock::Clock;
use crate::domain::customer::{FollowUpStatus, NewCustomer};
use crate::domain::expiry::{classify, ExpiryBucket};
use crate::router::AppState;
use crate::tests::utils::{
    body_json, body_string, get, post_form, send_json, sign_in, test_state, today,
};
use http::Method;
use serde_json::json;

/// Rajesh is 8 days past expiry, Meena is 3 days from it.
fn seed(state: &AppState) -> (i64, i64) {
    let overdue = state
        .db
        .create_customer(
            NewCustomer {
                name: "Rajesh Kumar".into(),
                phone: "98400 12345".into(),
                area: Some("Anna Nagar".into()),
                service: Some("3".into()),
                service_date: Some("2025-01-01".into()),
                ..Default::default()
            },
            0,
        )
        .unwrap();
    let upcoming = state
        .db
        .create_customer(
            NewCustomer {
                name: "Meena".into(),
                phone: "98400 54321".into(),
                service: Some("3".into()),
                service_date: Some("2025-01-12".into()),
                ..Default::default()
            },
            0,
        )
        .unwrap();
    (overdue.id, upcoming.id)
}

#[test]
fn lists_split_by_bucket() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    seed(&state);

    let overdue = body_string(get(&state, "/follow-ups/overdue", Some(&token)));
    assert!(overdue.contains("Rajesh Kumar"));
    assert!(overdue.contains("3M"));
    assert!(overdue.contains("8 days delayed"));
    assert!(!overdue.contains("Meena"));

    let upcoming = body_string(get(&state, "/follow-ups/upcoming", Some(&token)));
    assert!(upcoming.contains("Meena"));
    assert!(upcoming.contains("3 days left"));
    assert!(upcoming.contains("12/04/2025"));
    assert!(!upcoming.contains("Rajesh Kumar"));
}

#[test]
fn api_rows_carry_the_assessment() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    seed(&state);

    let rows = body_json(get(&state, "/api/follow-ups/overdue", Some(&token)));
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Rajesh Kumar");
    assert_eq!(rows[0]["expiryDate"], "2025-04-01");
    assert_eq!(rows[0]["daysUntilExpiry"], -8);
    assert_eq!(rows[0]["bucket"], "overdue");
}

#[test]
fn completing_via_api_renews_the_service() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    let (id, _) = seed(&state);

    let resp = send_json(
        &state,
        Method::PATCH,
        &format!("/api/customers/{id}/status"),
        &token,
        json!({ "followUpStatus": "completed" }),
    );
    assert_eq!(resp.status(), 200);
    let customer = body_json(resp);
    assert_eq!(customer["serviceDate"], "2025-04-09");
    assert_eq!(customer["followUpStatus"], "pending");

    // Renewed today, so a fresh full term lies ahead.
    let stored = state.db.get_customer(id).unwrap().unwrap();
    assert_eq!(
        classify(&stored, today(), state.clock.offset()),
        ExpiryBucket::NotDue
    );

    let overdue = body_json(get(&state, "/api/follow-ups/overdue", Some(&token)));
    assert!(overdue.as_array().unwrap().is_empty());

    let stats = body_json(get(&state, "/api/dashboard", Some(&token)));
    assert_eq!(stats["followUps"]["notDue"], 1);
    assert_eq!(stats["followUps"]["upcoming"], 1);
    assert_eq!(stats["followUps"]["overdue"], 0);
}

#[test]
fn status_field_is_accepted_as_shorthand() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    let (id, _) = seed(&state);

    let resp = send_json(
        &state,
        Method::PATCH,
        &format!("/api/customers/{id}/status"),
        &token,
        json!({ "status": "completed" }),
    );
    assert_eq!(resp.status(), 200);
    let customer = body_json(resp);
    assert_eq!(customer["serviceDate"], "2025-04-09");
    assert_eq!(customer["followUpStatus"], "pending");
}

#[test]
fn completing_via_form_redirects_back() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    let (_, id) = seed(&state);

    let resp = post_form(
        &state,
        &format!("/customers/{id}/status"),
        &token,
        "followUpStatus=completed",
    );
    assert_eq!(resp.status(), 302);

    let customer = state.db.get_customer(id).unwrap().unwrap();
    assert_eq!(customer.service_date.as_deref(), Some("2025-04-09"));
    assert_eq!(customer.follow_up_status, FollowUpStatus::Pending);
}

#[test]
fn generic_update_cannot_skip_the_renewal() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    let (id, _) = seed(&state);

    let resp = send_json(
        &state,
        Method::PUT,
        &format!("/api/customers/{id}"),
        &token,
        json!({ "followUpStatus": "completed" }),
    );
    let customer = body_json(resp);
    assert_eq!(customer["serviceDate"], "2025-04-09");
    assert_eq!(customer["followUpStatus"], "pending");
}

#[test]
fn unknown_status_is_rejected() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    let (id, _) = seed(&state);

    let resp = send_json(
        &state,
        Method::PATCH,
        &format!("/api/customers/{id}/status"),
        &token,
        json!({ "followUpStatus": "done" }),
    );
    assert_eq!(resp.status(), 400);
    let customer = state.db.get_customer(id).unwrap().unwrap();
    assert_eq!(customer.service_date.as_deref(), Some("2025-01-01"));
}

#[test]
fn export_downloads_a_workbook() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    seed(&state);

    let resp = get(&state, "/follow-ups/export?bucket=overdue", Some(&token));
    assert_eq!(resp.status(), 200);
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(disposition.contains("follow-ups-overdue-2025-04-09.xlsx"));

    let bad = get(&state, "/follow-ups/export?bucket=everything", Some(&token));
    assert_eq!(bad.status(), 400);
}

#[test]
fn dashboard_counts_buckets() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    seed(&state);

    let stats = body_json(get(&state, "/api/dashboard", Some(&token)));
    assert_eq!(stats["totalCustomers"], 2);
    assert_eq!(stats["followUps"]["overdue"], 1);
    assert_eq!(stats["followUps"]["upcoming"], 1);
    assert_eq!(stats["pendingComplaints"], 0);

    let page = get(&state, "/dashboard", Some(&token));
    assert_eq!(page.status(), 200);
}
