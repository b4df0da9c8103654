use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::error;

fn log_server_side(err: &ServerError) {
    if err.status() >= 500 {
        error!(error = %err, "request failed");
    }
}

fn fallback(status: u16, text: &'static str) -> Response {
    let mut resp = Response::new(Body::from(text));
    if let Ok(code) = http::StatusCode::from_u16(status) {
        *resp.status_mut() = code;
    }
    resp
}

/// Convert a ServerError into an HTML error page
pub fn html_error_response(err: ServerError) -> Response {
    log_server_side(&err);
    let status = err.status();
    let message = match &err {
        // Don't leak SQL details to the page.
        ServerError::DbError(_) => "Database Error".to_string(),
        other => other.to_string(),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| fallback(500, "Internal Server Error"))
}

/// Convert a ServerError into `{"message": ...}`
pub fn json_error_response(err: ServerError) -> Response {
    log_server_side(&err);
    let status = err.status();
    let message = match &err {
        ServerError::DbError(_) => "Database Error".to_string(),
        other => other.to_string(),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(json!({ "message": message }).to_string()))
        .unwrap_or_else(|_| fallback(500, "Internal Server Error"))
}
