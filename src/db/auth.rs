// src/db/auth.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

/// Insert an operator if they don't exist, then return the operator id.
/// Email should already be normalized by caller (trim/lowercase).
pub fn get_or_create_operator(
    conn: &Connection,
    email: &str,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert or ignore into operators (email, created_at) values (?, ?)",
        params![email, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert operator failed: {e}")))?;

    conn.query_row(
        "select id from operators where email = ?",
        params![email],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select operator id failed: {e}")))
}

pub fn operator_email(conn: &Connection, operator_id: i64) -> Result<String, ServerError> {
    conn.query_row(
        "select email from operators where id = ?",
        params![operator_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select operator email failed: {e}")))
}

pub fn touch_last_login(conn: &Connection, operator_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update operators set last_login_at = ? where id = ?",
        params![now, operator_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}

/// Insert a magic link row (token_hash should be SHA-256 bytes).
pub fn insert_magic_link(
    conn: &Connection,
    operator_id: i64,
    token_hash: &[u8],
    created_at: i64,
    expires_at: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert into magic_links (operator_id, token_hash, created_at, expires_at) values (?, ?, ?, ?)",
        params![operator_id, token_hash, created_at, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("insert magic link failed: {e}")))?;
    Ok(())
}

/// Consume a magic link by token hash. It must exist, be unexpired and unused.
/// If valid, sets used_at=now and returns Some(operator_id); otherwise Ok(None).
///
/// Runs in a transaction so two redeemers can't both win.
pub fn consume_magic_link(
    conn: &mut Connection,
    token_hash: &[u8],
    now: i64,
) -> Result<Option<i64>, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let row: Option<(i64, i64, i64, Option<i64>)> = tx
        .query_row(
            "select id, operator_id, expires_at, used_at
             from magic_links
             where token_hash = ?",
            params![token_hash],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select magic link in tx failed: {e}")))?;

    let Some((link_id, operator_id, expires_at, used_at)) = row else {
        tx.rollback().ok();
        return Ok(None);
    };

    if used_at.is_some() || expires_at <= now {
        tx.rollback().ok();
        return Ok(None);
    }

    // Guard used_at IS NULL so only one consumer wins.
    let updated = tx
        .execute(
            "update magic_links set used_at = ? where id = ? and used_at is null",
            params![now, link_id],
        )
        .map_err(|e| ServerError::DbError(format!("update magic link used_at failed: {e}")))?;

    if updated != 1 {
        tx.rollback().ok();
        return Ok(None);
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

    Ok(Some(operator_id))
}

pub fn insert_session(
    conn: &Connection,
    operator_id: i64,
    token_hash: &[u8],
    now: i64,
    expires_at: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert into sessions (operator_id, token_hash, created_at, expires_at) values (?, ?, ?, ?)",
        params![operator_id, token_hash, now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;
    Ok(())
}

/// The operator (id, email) behind a live session, if any.
pub fn find_session_operator(
    conn: &Connection,
    token_hash: &[u8],
    now: i64,
) -> Result<Option<(i64, String)>, ServerError> {
    conn.query_row(
        r#"
        select o.id, o.email
        from sessions s
        join operators o on o.id = s.operator_id
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![token_hash, now],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, token_hash: &[u8], now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, token_hash],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}
