// src/auth/sessions.rs
use crate::auth::token::{hash_token, new_token};
use crate::db::auth as db_auth;
use crate::errors::ServerError;
use http::header::{AUTHORIZATION, COOKIE};
use http::HeaderMap;
use rusqlite::Connection;

pub const SESSION_COOKIE: &str = "session";

/// The signed-in operator for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub id: i64,
    pub email: String,
}

/// Creates a session and returns the raw token for the cookie.
pub fn create_session(
    conn: &Connection,
    operator_id: i64,
    now: i64,
    ttl_secs: i64,
) -> Result<String, ServerError> {
    let raw_token = new_token();
    let hash = hash_token(&raw_token);
    db_auth::insert_session(conn, operator_id, &hash, now, now + ttl_secs)?;
    Ok(raw_token)
}

pub fn load_operator(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<Operator>, ServerError> {
    let hash = hash_token(raw_token);
    Ok(db_auth::find_session_operator(conn, &hash, now)?
        .map(|(id, email)| Operator { id, email }))
}

pub fn end_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    db_auth::revoke_session(conn, &hash_token(raw_token), now)
}

/// The session token from the `session` cookie, or from `Authorization: Bearer`.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string());

    from_cookie
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| t.trim().to_string())
        })
        .filter(|t| !t.is_empty())
}

pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
