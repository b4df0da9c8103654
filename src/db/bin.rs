// src/db/bin.rs
use rusqlite::{params, Connection};
use tracing::warn;

use crate::db::customers::get_customer;
use crate::domain::customer::{from_unix, DeletedCustomer};
use crate::errors::ServerError;

/// Moves a customer into the bin: the snapshot insert and the delete commit together.
/// Returns the bin row.
pub fn archive_and_delete_customer(
    conn: &mut Connection,
    id: i64,
    now: i64,
) -> Result<DeletedCustomer, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let Some(customer) = get_customer(&tx, id)? else {
        tx.rollback().ok();
        return Err(ServerError::not_found("Customer"));
    };

    tx.execute(
        r#"
        insert into deleted_customers
            (original_id, name, phone, email, address, area, service, brand, created_at, deleted_at)
        values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            customer.id,
            customer.name,
            customer.phone,
            customer.email,
            customer.address,
            customer.area,
            customer.service,
            customer.brand,
            customer.created_at.timestamp(),
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("archive customer failed: {e}")))?;
    let bin_id = tx.last_insert_rowid();

    let deleted = tx
        .execute("delete from customers where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete customer failed: {e}")))?;

    // Guard so a concurrent delete can't leave a second snapshot behind.
    if deleted != 1 {
        tx.rollback().ok();
        warn!(customer_id = id, "customer vanished while being archived");
        return Err(ServerError::PartialFailure(format!(
            "customer {id} was archived but could not be removed"
        )));
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

    Ok(DeletedCustomer {
        id: bin_id,
        original_id: customer.id,
        name: customer.name,
        phone: customer.phone,
        email: customer.email,
        address: customer.address,
        area: customer.area,
        service: customer.service,
        brand: customer.brand,
        created_at: customer.created_at,
        deleted_at: from_unix(now),
    })
}

/// Bin contents, most recently deleted first.
pub fn list_deleted_customers(conn: &Connection) -> Result<Vec<DeletedCustomer>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select id, original_id, name, phone, email, address, area, service, brand, created_at, deleted_at
             from deleted_customers
             order by deleted_at desc, id desc",
        )
        .map_err(|e| ServerError::DbError(format!("prepare list bin failed: {e}")))?;

    let rows = stmt
        .query_map([], |r| {
            Ok(DeletedCustomer {
                id: r.get(0)?,
                original_id: r.get(1)?,
                name: r.get(2)?,
                phone: r.get(3)?,
                email: r.get(4)?,
                address: r.get(5)?,
                area: r.get(6)?,
                service: r.get(7)?,
                brand: r.get(8)?,
                created_at: from_unix(r.get(9)?),
                deleted_at: from_unix(r.get(10)?),
            })
        })
        .map_err(|e| ServerError::DbError(format!("list bin failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
