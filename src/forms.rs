// src/forms.rs
//! Reading request bodies and query strings.
use crate::errors::ServerError;
use astra::Body;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io::Read;

const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub type Params = HashMap<String, String>;

pub fn read_body(mut body: Body) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    body.reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::Validation(format!("could not read request body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::Validation("request body too large".into()));
    }
    Ok(buf)
}

/// `application/x-www-form-urlencoded` pairs. Later duplicates win.
pub fn parse_form(bytes: &[u8]) -> Params {
    url::form_urlencoded::parse(bytes).into_owned().collect()
}

pub fn parse_query(query: Option<&str>) -> Params {
    query.map(|q| parse_form(q.as_bytes())).unwrap_or_default()
}

pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ServerError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ServerError::Validation(format!("invalid JSON body: {e}")))
}

/// Percent-decodes one path segment.
pub fn decode_segment(raw: &str) -> String {
    url::form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(k, v)| if v.is_empty() { k.into_owned() } else { format!("{k}={v}") })
        .unwrap_or_default()
}

/// Trimmed value, `None` when absent or blank.
pub fn field(params: &Params, name: &str) -> Option<String> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn required(params: &Params, name: &str) -> Result<String, ServerError> {
    field(params, name).ok_or_else(|| ServerError::Validation(format!("{name} is required")))
}
