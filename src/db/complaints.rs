// src/db/complaints.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::customers::list_customer_names;
use crate::domain::complaint::{Complaint, ComplaintStatus, NewComplaint};
use crate::domain::customer::from_unix;
use crate::domain::search::same_name;
use crate::errors::ServerError;

fn complaint_from_row(r: &Row<'_>) -> rusqlite::Result<Complaint> {
    let status: String = r.get(4)?;
    Ok(Complaint {
        id: r.get(0)?,
        customer_name: r.get(1)?,
        subject: r.get(2)?,
        body: r.get(3)?,
        status: ComplaintStatus::parse(&status).unwrap_or_default(),
        created_at: from_unix(r.get(5)?),
    })
}

fn get_complaint(conn: &Connection, id: i64) -> Result<Option<Complaint>, ServerError> {
    conn.query_row(
        "select id, customer_name, subject, body, status, created_at from complaints where id = ?",
        params![id],
        complaint_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select complaint failed: {e}")))
}

/// All complaints, newest first.
pub fn list_complaints(conn: &Connection) -> Result<Vec<Complaint>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select id, customer_name, subject, body, status, created_at
             from complaints
             order by created_at desc, id desc",
        )
        .map_err(|e| ServerError::DbError(format!("prepare list complaints failed: {e}")))?;

    let rows = stmt
        .query_map([], complaint_from_row)
        .map_err(|e| ServerError::DbError(format!("list complaints failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Validates the submission and checks, inside the same transaction as the insert,
/// that a customer with that name (ignoring case) exists. Nothing is written otherwise.
pub fn create_complaint(
    conn: &mut Connection,
    new: NewComplaint,
    now: i64,
) -> Result<Complaint, ServerError> {
    let new = new.validated()?;

    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let known = list_customer_names(&tx)?
        .iter()
        .any(|name| same_name(name, &new.customer_name));
    if !known {
        tx.rollback().ok();
        return Err(ServerError::Validation(
            "Customer not found in the system".into(),
        ));
    }

    tx.execute(
        "insert into complaints (customer_name, subject, body, status, created_at)
         values (?, ?, ?, 'pending', ?)",
        params![new.customer_name, new.subject, new.body, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert complaint failed: {e}")))?;

    let id = tx.last_insert_rowid();
    let complaint = get_complaint(&tx, id)?.ok_or(ServerError::InternalError)?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

    Ok(complaint)
}

pub fn update_complaint_status(
    conn: &Connection,
    id: i64,
    status: ComplaintStatus,
) -> Result<Complaint, ServerError> {
    let updated = conn
        .execute(
            "update complaints set status = ? where id = ?",
            params![status.as_str(), id],
        )
        .map_err(|e| ServerError::DbError(format!("update complaint failed: {e}")))?;

    if updated != 1 {
        return Err(ServerError::not_found("Complaint"));
    }

    get_complaint(conn, id)?.ok_or_else(|| ServerError::not_found("Complaint"))
}

/// Permanent delete; complaints have no bin.
pub fn delete_complaint(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from complaints where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete complaint failed: {e}")))?;

    if deleted != 1 {
        return Err(ServerError::not_found("Complaint"));
    }
    Ok(())
}
