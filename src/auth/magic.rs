// src/auth/magic.rs
use crate::config::AppConfig;
use crate::errors::ServerError;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::auth::token::{hash_token, new_token};
use crate::db::auth as db_auth;

#[derive(Debug, Clone)]
pub struct MagicLinkConfig {
    /// TTL for magic links in seconds.
    pub ttl_secs: i64,
    /// Relative path used when building links.
    pub magic_path: String,
    /// Normalized emails allowed to sign in.
    pub operator_emails: Vec<String>,
}

impl MagicLinkConfig {
    pub fn from_app(cfg: &AppConfig) -> Self {
        Self {
            ttl_secs: cfg.magic_link_ttl_secs,
            magic_path: "/auth/magic".to_string(),
            operator_emails: cfg.operator_emails.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedMagicLink {
    /// Relative URL like "/auth/magic?token=...". Carries the raw token, which is never stored.
    pub link: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone)]
pub struct RedeemedMagicLink {
    pub operator_id: i64,
    pub email: String,
}

#[derive(Debug)]
pub struct MagicLinkService {
    cfg: MagicLinkConfig,
}

impl MagicLinkService {
    pub fn new(cfg: MagicLinkConfig) -> Self {
        Self { cfg }
    }

    /// Trim + lowercase, minimal sanity check.
    pub fn normalize_email(email: &str) -> Result<String, ServerError> {
        let e = email.trim().to_lowercase();
        if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
            return Err(ServerError::Validation("invalid email".into()));
        }
        Ok(e)
    }

    fn build_link(&self, token: &str) -> String {
        format!("{}?token={}", self.cfg.magic_path, token)
    }

    /// Issues a single-use sign-in link for an allowlisted operator.
    ///
    /// Returns `Ok(None)` for addresses that aren't operators, so callers can
    /// answer the same way either way.
    pub fn request_link(
        &self,
        conn: &Connection,
        email: &str,
        now: i64,
    ) -> Result<Option<IssuedMagicLink>, ServerError> {
        let email = Self::normalize_email(email)?;
        if !self.cfg.operator_emails.iter().any(|e| *e == email) {
            warn!(%email, "sign-in requested for an address that is not an operator");
            return Ok(None);
        }

        let operator_id = db_auth::get_or_create_operator(conn, &email, now)?;

        let token = new_token();
        let token_hash = hash_token(&token);
        let expires_at = now + self.cfg.ttl_secs;

        db_auth::insert_magic_link(conn, operator_id, &token_hash, now, expires_at)?;

        let link = self.build_link(&token);
        info!(operator_id, %email, %link, expires_at, "magic link issued");

        Ok(Some(IssuedMagicLink { link, expires_at }))
    }

    /// Redeems a link (single use) and records the login.
    pub fn redeem(
        &self,
        conn: &mut Connection,
        token: &str,
        now: i64,
    ) -> Result<RedeemedMagicLink, ServerError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ServerError::Validation("missing token".into()));
        }

        let token_hash = hash_token(token);
        let Some(operator_id) = db_auth::consume_magic_link(conn, &token_hash, now)? else {
            return Err(ServerError::Unauthorized("invalid or expired link".into()));
        };

        db_auth::touch_last_login(conn, operator_id, now)?;
        let email = db_auth::operator_email(conn, operator_id)?;

        Ok(RedeemedMagicLink { operator_id, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::SCHEMA_SQL;
    use rusqlite::params;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA_SQL).unwrap();
        conn
    }

    fn token_of(issued: &IssuedMagicLink) -> &str {
        issued.link.split("token=").nth(1).unwrap()
    }

    fn operator_id(conn: &Connection, email: &str) -> i64 {
        conn.query_row(
            "select id from operators where email = ?",
            params![email],
            |r| r.get(0),
        )
        .unwrap()
    }

    fn svc(ttl_secs: i64) -> MagicLinkService {
        MagicLinkService::new(MagicLinkConfig {
            ttl_secs,
            magic_path: "/auth/magic".to_string(),
            operator_emails: vec!["owner@shop.com".to_string()],
        })
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let e = MagicLinkService::normalize_email("  Owner@Shop.COM ").unwrap();
        assert_eq!(e, "owner@shop.com");
    }

    #[test]
    fn normalize_email_rejects_invalid() {
        for bad in ["", "no-at-symbol", "@shop.com", "owner@"] {
            assert!(MagicLinkService::normalize_email(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn request_link_stores_only_the_hash() {
        let conn = conn();
        let now = 1000;
        let issued = svc(60)
            .request_link(&conn, "Owner@Shop.com", now)
            .unwrap()
            .expect("operator gets a link");

        let stored: Vec<u8> = conn
            .query_row(
                "select token_hash from magic_links where operator_id = ?",
                params![operator_id(&conn, "owner@shop.com")],
                |r| r.get(0),
            )
            .unwrap();
        let token = token_of(&issued);
        assert_eq!(token.len(), 43);
        assert_eq!(stored.as_slice(), hash_token(token).as_slice());
        assert!(issued.link.starts_with("/auth/magic?token="));
        assert_eq!(issued.expires_at, now + 60);
    }

    #[test]
    fn strangers_get_no_link_and_no_row() {
        let conn = conn();
        let issued = svc(60).request_link(&conn, "stranger@shop.com", 1000).unwrap();
        assert!(issued.is_none());

        let operators: i64 = conn
            .query_row("select count(*) from operators", [], |r| r.get(0))
            .unwrap();
        assert_eq!(operators, 0);
    }

    #[test]
    fn redeem_succeeds_once_then_fails() {
        let mut conn = conn();
        let service = svc(60);
        let issued = service
            .request_link(&conn, "owner@shop.com", 1000)
            .unwrap()
            .unwrap();

        let redeemed = service.redeem(&mut conn, token_of(&issued), 1001).unwrap();
        assert_eq!(redeemed.operator_id, operator_id(&conn, "owner@shop.com"));
        assert_eq!(redeemed.email, "owner@shop.com");

        let last_login: Option<i64> = conn
            .query_row(
                "select last_login_at from operators where id = ?",
                params![redeemed.operator_id],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(last_login, Some(1001));

        match service.redeem(&mut conn, token_of(&issued), 1002) {
            Err(ServerError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got: {:?}", other),
        }
    }

    #[test]
    fn redeem_fails_if_expired() {
        let mut conn = conn();
        let service = svc(1);
        let issued = service
            .request_link(&conn, "owner@shop.com", 1000)
            .unwrap()
            .unwrap();

        match service.redeem(&mut conn, token_of(&issued), 1002) {
            Err(ServerError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got: {:?}", other),
        }
    }

    #[test]
    fn redeem_rejects_missing_token() {
        let mut conn = conn();
        match svc(60).redeem(&mut conn, "   ", 1000) {
            Err(ServerError::Validation(_)) => {}
            other => panic!("expected Validation, got: {:?}", other),
        }
    }
}
