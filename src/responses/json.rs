use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;

pub fn json_response<T: Serialize + ?Sized>(value: &T) -> ResultResp {
    json_status_response(200, value)
}

pub fn json_status_response<T: Serialize + ?Sized>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
