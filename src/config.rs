// src/config.rs
use chrono::FixedOffset;
use dotenv::dotenv;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,

    /// Offset used to turn timestamps into calendar days.
    pub utc_offset: FixedOffset,

    /// Normalized (lowercase) emails allowed to sign in.
    pub operator_emails: Vec<String>,
    pub session_ttl_secs: i64,
    pub magic_link_ttl_secs: i64,

    /// Render sign-in links on the page instead of only logging them.
    pub echo_magic_links: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "renewal_desk.sqlite3".to_string());

        let bind_addr = parse_var("BIND_ADDR", "127.0.0.1:3000")?;
        let max_workers: usize = parse_var("MAX_WORKERS", "8")?;
        let offset_minutes: i32 = parse_var("UTC_OFFSET_MINUTES", "0")?;
        let utc_offset = offset_from_minutes(offset_minutes).ok_or(ConfigError::Invalid {
            name: "UTC_OFFSET_MINUTES",
            value: offset_minutes.to_string(),
        })?;

        let operator_emails = parse_email_list(&env::var("OPERATOR_EMAILS").unwrap_or_default());
        if operator_emails.is_empty() {
            return Err(ConfigError::Missing("OPERATOR_EMAILS"));
        }

        let session_ttl_days: i64 = parse_var("SESSION_TTL_DAYS", "7")?;
        let magic_link_ttl_minutes: i64 = parse_var("MAGIC_LINK_TTL_MINUTES", "15")?;
        let echo_magic_links: bool = parse_var("ECHO_MAGIC_LINKS", "false")?;

        Ok(Self {
            database_path,
            bind_addr,
            max_workers,
            utc_offset,
            operator_emails,
            session_ttl_secs: session_ttl_days * 24 * 60 * 60,
            magic_link_ttl_secs: magic_link_ttl_minutes * 60,
            echo_magic_links,
        })
    }
}

#[cfg(test)]
impl AppConfig {
    /// Defaults for a given database file, for tests.
    pub fn with_database(path: impl Into<String>) -> Self {
        use chrono::{Offset, Utc};

        Self {
            database_path: path.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            utc_offset: Utc.fix(),
            operator_emails: Vec::new(),
            session_ttl_secs: 7 * 24 * 60 * 60,
            magic_link_ttl_secs: 15 * 60,
            echo_magic_links: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { name, value })
}

pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

pub fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
