// src/db/customers.rs
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension, Row};

use crate::domain::customer::{from_unix, Customer, CustomerPatch, FollowUpStatus, NewCustomer};
use crate::errors::ServerError;

const CUSTOMER_COLUMNS: &str = "id, name, phone, email, address, area, service, brand, \
                                service_date, follow_up_status, created_at";

pub(crate) fn customer_from_row(r: &Row<'_>) -> rusqlite::Result<Customer> {
    let status: String = r.get(9)?;
    Ok(Customer {
        id: r.get(0)?,
        name: r.get(1)?,
        phone: r.get(2)?,
        email: r.get(3)?,
        address: r.get(4)?,
        area: r.get(5)?,
        service: r.get(6)?,
        brand: r.get(7)?,
        service_date: r.get(8)?,
        // The schema's check constraint only admits the two known values.
        follow_up_status: FollowUpStatus::parse(&status).unwrap_or_default(),
        created_at: from_unix(r.get(10)?),
    })
}

/// All customers, newest first.
pub fn list_customers(conn: &Connection) -> Result<Vec<Customer>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {CUSTOMER_COLUMNS} from customers order by created_at desc, id desc"
        ))
        .map_err(|e| ServerError::DbError(format!("prepare list customers failed: {e}")))?;

    let rows = stmt
        .query_map([], customer_from_row)
        .map_err(|e| ServerError::DbError(format!("list customers failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn get_customer(conn: &Connection, id: i64) -> Result<Option<Customer>, ServerError> {
    conn.query_row(
        &format!("select {CUSTOMER_COLUMNS} from customers where id = ?"),
        params![id],
        customer_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select customer failed: {e}")))
}

/// Inserts an already validated customer. Follow-up starts as `pending`.
pub fn insert_customer(
    conn: &Connection,
    new: &NewCustomer,
    now: i64,
) -> Result<Customer, ServerError> {
    conn.execute(
        r#"
        insert into customers
            (name, phone, email, address, area, service, brand, service_date, follow_up_status, created_at)
        values (?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?)
        "#,
        params![
            new.name,
            new.phone,
            new.email,
            new.address,
            new.area,
            new.service,
            new.brand,
            new.service_date,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert customer failed: {e}")))?;

    let id = conn.last_insert_rowid();
    get_customer(conn, id)?.ok_or(ServerError::InternalError)
}

/// Column assignments for the fields a patch carries. A blank optional field clears the column.
fn patch_assignments(patch: &CustomerPatch) -> (Vec<&'static str>, Vec<Value>) {
    let mut columns = Vec::new();
    let mut values = Vec::new();

    let required = [("name", &patch.name), ("phone", &patch.phone)];
    for (column, value) in required {
        if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            columns.push(column);
            values.push(Value::Text(v.to_string()));
        }
    }

    let optional = [
        ("email", &patch.email),
        ("address", &patch.address),
        ("area", &patch.area),
        ("service", &patch.service),
        ("brand", &patch.brand),
        ("service_date", &patch.service_date),
    ];
    for (column, value) in optional {
        if let Some(v) = value {
            let v = v.trim();
            columns.push(column);
            values.push(if v.is_empty() {
                Value::Null
            } else {
                Value::Text(v.to_string())
            });
        }
    }

    if let Some(status) = patch.follow_up_status {
        columns.push("follow_up_status");
        values.push(Value::Text(status.as_str().to_string()));
    }

    (columns, values)
}

/// Applies every field of `patch` in one UPDATE statement, so readers see
/// either none or all of the new values. Returns the updated row.
pub fn update_customer(
    conn: &mut Connection,
    id: i64,
    patch: &CustomerPatch,
) -> Result<Customer, ServerError> {
    patch.validate()?;

    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    if patch.is_empty() {
        let current = get_customer(&tx, id)?.ok_or_else(|| ServerError::not_found("Customer"))?;
        tx.rollback().ok();
        return Ok(current);
    }

    let (columns, mut values) = patch_assignments(patch);
    let set_clause = columns
        .iter()
        .map(|c| format!("{c} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    values.push(Value::Integer(id));

    let updated = tx
        .execute(
            &format!("update customers set {set_clause} where id = ?"),
            params_from_iter(values),
        )
        .map_err(|e| ServerError::DbError(format!("update customer failed: {e}")))?;

    if updated != 1 {
        tx.rollback().ok();
        return Err(ServerError::not_found("Customer"));
    }

    let customer = get_customer(&tx, id)?.ok_or(ServerError::InternalError)?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

    Ok(customer)
}

/// Names only, for checking complaint submissions.
pub fn list_customer_names(conn: &Connection) -> Result<Vec<String>, ServerError> {
    let mut stmt = conn
        .prepare("select name from customers")
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let rows = stmt
        .query_map([], |r| r.get::<_, String>(0))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
