use crate::router::handle;
use crate::tests::utils::{body_string, get, location, request, sign_in, test_state, OPERATOR};
use http::Method;

#[test]
fn login_page_loads_successfully() {
    let (_dir, state) = test_state();
    let resp = get(&state, "/login", None);

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn pages_redirect_to_login_without_a_session() {
    let (_dir, state) = test_state();
    for uri in ["/", "/dashboard", "/customers", "/follow-ups/overdue", "/bin"] {
        let resp = get(&state, uri, None);
        assert_eq!(resp.status(), 302, "{uri}");
        assert_eq!(location(&resp), "/login", "{uri}");
    }
}

#[test]
fn api_without_session_is_401_json() {
    let (_dir, state) = test_state();
    let resp = get(&state, "/api/customers", None);

    assert_eq!(resp.status(), 401);
    let body = body_string(resp);
    assert!(body.contains("\"message\""));
}

#[test]
fn forged_session_is_rejected() {
    let (_dir, state) = test_state();
    let resp = get(&state, "/dashboard", Some("not-a-real-token"));
    assert_eq!(resp.status(), 302);
}

#[test]
fn request_link_returns_partial_html_for_htmx() {
    let (_dir, state) = test_state();
    let req = {
        let mut req = request(
            Method::POST,
            "/auth/request-link",
            None,
            Some("application/x-www-form-urlencoded"),
            &format!("email={OPERATOR}"),
        );
        req.headers_mut()
            .insert("HX-Request", http::HeaderValue::from_static("true"));
        req
    };

    let resp = handle(req, &state).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Check your email"));
    assert!(body.contains(OPERATOR));
    assert!(body.contains("Expires in 15 minutes."));
    // Partial only, so htmx can swap it in.
    assert!(!body.contains("<!DOCTYPE html>"));
    assert!(!body.contains("<html"));
}

#[test]
fn magic_link_signs_the_operator_in() {
    let (_dir, state) = test_state();
    let req = request(
        Method::POST,
        "/auth/request-link",
        None,
        Some("application/x-www-form-urlencoded"),
        "email=Owner%40Shop.com",
    );
    let body = body_string(handle(req, &state).unwrap());

    // Links are echoed on the page in the test config.
    let start = body.find("/auth/magic?token=").expect("link shown");
    let link: String = body[start..].chars().take_while(|c| *c != '"').collect();

    let resp = get(&state, &link, None);
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/dashboard");
    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let token = cookie
        .trim_start_matches("session=")
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let dashboard = get(&state, "/dashboard", Some(&token));
    assert_eq!(dashboard.status(), 200);
    assert!(body_string(dashboard).contains(OPERATOR));

    // Links are single use.
    let again = get(&state, &link, None);
    assert_eq!(again.status(), 401);
}

#[test]
fn strangers_see_the_same_message_but_get_no_link() {
    let (_dir, state) = test_state();
    let req = request(
        Method::POST,
        "/auth/request-link",
        None,
        Some("application/x-www-form-urlencoded"),
        "email=stranger@shop.com",
    );
    let resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Check your email"));
    assert!(!body.contains("/auth/magic?token="));
}

#[test]
fn logout_ends_the_session() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);

    let req = request(Method::POST, "/logout", Some(&token), None, "");
    let resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");

    let after = get(&state, "/dashboard", Some(&token));
    assert_eq!(after.status(), 302);
}

#[test]
fn bearer_header_works_for_the_api() {
    let (_dir, state) = test_state();
    let token = sign_in(&state);

    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/api/dashboard")
        .header("Authorization", format!("Bearer {token}"))
        .body(astra::Body::empty())
        .unwrap();
    let resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 200);
}
