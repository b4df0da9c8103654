use crate::db::DataStore;
use crate::tests::utils::{
    body_json, body_string, get, location, post_form, send_json, sign_in, test_state,
};
use http::Method;
use serde_json::json;

#[test]
fn create_customer_via_form_then_view_it() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);

    let resp = post_form(
        &state,
        "/customers",
        &token,
        "name=Rajesh+Kumar&phone=98400+12345&area=Anna+Nagar&service=3&serviceDate=2025-01-01",
    );
    assert_eq!(resp.status(), 302);
    let detail_uri = location(&resp).to_string();
    assert!(detail_uri.starts_with("/customers/"));

    let body = body_string(get(&state, &detail_uri, Some(&token)));
    assert!(body.contains("Rajesh Kumar"));
    assert!(body.contains("01/04/2025"));
    assert!(body.contains("8 days delayed"));
}

#[test]
fn missing_phone_shows_the_form_again() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);

    let resp = post_form(&state, "/customers", &token, "name=Priya");
    assert_eq!(resp.status(), 400);
    let body = body_string(resp);
    assert!(body.contains("phone is required"));
    assert!(body.contains("Priya"));
    assert!(state.db.list_customers().unwrap().is_empty());
}

#[test]
fn customer_list_search_is_case_insensitive() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    for form in ["name=Rajesh+Kumar&phone=1", "name=Meena&phone=2"] {
        post_form(&state, "/customers", &token, form);
    }

    let body = body_string(get(&state, "/customers?q=RAJ", Some(&token)));
    assert!(body.contains("Rajesh Kumar"));
    assert!(!body.contains("Meena"));
}

#[test]
fn api_crud_round() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);

    let created = send_json(
        &state,
        Method::POST,
        "/api/customers",
        &token,
        json!({ "name": "Rajesh Kumar", "phone": "98400 12345", "service": "6" }),
    );
    assert_eq!(created.status(), 201);
    let created = body_json(created);
    assert_eq!(created["followUpStatus"], "pending");
    let id = created["id"].as_i64().unwrap();

    let updated = send_json(
        &state,
        Method::PUT,
        &format!("/api/customers/{id}"),
        &token,
        json!({ "area": "Adyar" }),
    );
    assert_eq!(updated.status(), 200);
    let updated = body_json(updated);
    assert_eq!(updated["area"], "Adyar");
    assert_eq!(updated["name"], "Rajesh Kumar");

    let found = body_json(get(&state, "/api/customers/search/rajesh%20k", Some(&token)));
    assert_eq!(found.as_array().unwrap().len(), 1);

    let missing = get(&state, "/api/customers/9999", Some(&token));
    assert_eq!(missing.status(), 404);
    assert_eq!(body_json(missing)["message"], "Customer not found");
}

#[test]
fn delete_moves_customer_to_the_bin() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    post_form(&state, "/customers", &token, "name=Rajesh+Kumar&phone=1");
    let id = state.db.list_customers().unwrap()[0].id;

    let resp = post_form(&state, &format!("/customers/{id}/delete"), &token, "");
    assert_eq!(resp.status(), 302);
    assert!(state.db.get_customer(id).unwrap().is_none());

    let bin = state.db.list_deleted_customers().unwrap();
    assert_eq!(bin.len(), 1);
    assert_eq!(bin[0].original_id, id);

    let page = body_string(get(&state, "/bin", Some(&token)));
    assert!(page.contains("Rajesh Kumar"));

    // A second delete finds nothing and leaves the bin alone.
    let again = send_json(
        &state,
        Method::DELETE,
        &format!("/api/customers/{id}"),
        &token,
        json!({}),
    );
    assert_eq!(again.status(), 404);
    assert_eq!(state.db.list_deleted_customers().unwrap().len(), 1);
}

#[test]
fn month_view_lists_this_months_customers() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    post_form(&state, "/customers", &token, "name=Rajesh+Kumar&phone=1");

    let body = body_string(get(&state, "/customers/month", Some(&token)));
    assert!(body.contains("04/2025"));
    assert!(body.contains("Rajesh Kumar"));

    let other = body_string(get(&state, "/customers/month?year=2025&month=3", Some(&token)));
    assert!(!other.contains("Rajesh Kumar"));
}

#[test]
fn unknown_routes_are_404() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);
    assert_eq!(get(&state, "/nope", Some(&token)).status(), 404);
    assert_eq!(get(&state, "/customers/abc", Some(&token)).status(), 404);
}
