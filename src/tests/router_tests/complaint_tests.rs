use crate::db::DataStore;
use crate::domain::complaint::ComplaintStatus;
use crate::domain::customer::NewCustomer;
use crate::tests::utils::{body_json, body_string, get, post_form, send_json, sign_in, test_state};
use http::Method;
use serde_json::json;

fn with_customer() -> (tempfile::TempDir, crate::router::AppState, String) {
    let (dir, state) = test_state();
    state
        .db
        .create_customer(
            NewCustomer {
                name: "Rajesh Kumar".into(),
                phone: "98400 12345".into(),
                ..Default::default()
            },
            0,
        )
        .unwrap();
    let token = sign_in(&state);
    (dir, state, token)
}

#[test]
fn complaint_for_unknown_customer_writes_nothing() {
    let (_dir, state, token) = with_customer();

    let resp = send_json(
        &state,
        Method::POST,
        "/api/complaints",
        &token,
        json!({ "customerName": "Nobody", "subject": "Leak", "body": "Tap leaks" }),
    );
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["message"], "Customer not found in the system");
    assert!(state.db.list_complaints().unwrap().is_empty());

    let form = post_form(
        &state,
        "/complaints",
        &token,
        "customerName=Nobody&subject=Leak&body=Tap+leaks",
    );
    assert_eq!(form.status(), 400);
    assert!(body_string(form).contains("Customer not found in the system"));
    assert!(state.db.list_complaints().unwrap().is_empty());
}

#[test]
fn complaint_name_match_ignores_case() {
    let (_dir, state, token) = with_customer();

    let resp = send_json(
        &state,
        Method::POST,
        "/api/complaints",
        &token,
        json!({ "customerName": "rajesh kumar", "subject": "Leak", "body": "Tap leaks" }),
    );
    assert_eq!(resp.status(), 201);
    assert_eq!(body_json(resp)["status"], "pending");
}

#[test]
fn complaint_lifecycle_over_forms() {
    let (_dir, state, token) = with_customer();

    let resp = post_form(
        &state,
        "/complaints",
        &token,
        "customerName=Rajesh+Kumar&subject=Water+tastes+of+metal&body=Since+Monday",
    );
    assert_eq!(resp.status(), 302);
    let id = state.db.list_complaints().unwrap()[0].id;

    let page = body_string(get(&state, "/complaints?q=metal", Some(&token)));
    assert!(page.contains("Rajesh Kumar"));
    let none = body_string(get(&state, "/complaints?q=billing", Some(&token)));
    assert!(none.contains("No complaints found."));

    post_form(&state, &format!("/complaints/{id}/status"), &token, "status=resolved");
    assert_eq!(
        state.db.list_complaints().unwrap()[0].status,
        ComplaintStatus::Resolved
    );

    post_form(&state, &format!("/complaints/{id}/delete"), &token, "");
    assert!(state.db.list_complaints().unwrap().is_empty());
}

#[test]
fn api_complaint_patch_and_delete() {
    let (_dir, state, token) = with_customer();
    let created = body_json(send_json(
        &state,
        Method::POST,
        "/api/complaints",
        &token,
        json!({ "customerName": "Rajesh Kumar", "subject": "Leak", "body": "Tap leaks" }),
    ));
    let id = created["id"].as_i64().unwrap();

    let patched = send_json(
        &state,
        Method::PATCH,
        &format!("/api/complaints/{id}"),
        &token,
        json!({ "status": "resolved" }),
    );
    assert_eq!(body_json(patched)["status"], "resolved");

    let deleted = send_json(
        &state,
        Method::DELETE,
        &format!("/api/complaints/{id}"),
        &token,
        json!({}),
    );
    assert_eq!(body_json(deleted)["message"], "Complaint deleted");

    let gone = send_json(
        &state,
        Method::DELETE,
        &format!("/api/complaints/{id}"),
        &token,
        json!({}),
    );
    assert_eq!(gone.status(), 404);
}
