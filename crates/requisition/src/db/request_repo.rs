//! Request repository: CRUD operations for the `request` table.

use chrono::Utc;
use rusqlite::{params, Row};

use super::{Database, DatabaseError};
use crate::model::RequestRow;

/// Field values written by an insert or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestValues {
    pub details: String,
    pub branch_id: Option<i64>,
    pub dept_id: Option<i64>,
    pub mis_id: Option<i64>,
}

fn from_row(row: &Row<'_>) -> Result<RequestRow, rusqlite::Error> {
    Ok(RequestRow {
        id: row.get("id")?,
        request_details: row.get("request_details")?,
        branch_id: row.get("branch_id")?,
        dept_id: row.get("dept_id")?,
        mis_id: row.get("mis_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Inserts a new request row and returns its id.
pub fn insert(db: &Database, values: &RequestValues) -> Result<i64, DatabaseError> {
    let now = Utc::now().to_rfc3339();
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO request (request_details, branch_id, dept_id, mis_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                values.details,
                values.branch_id,
                values.dept_id,
                values.mis_id,
                now
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Overwrites details and all three references of an existing row.
///
/// References absent from `values` are stored as NULL. Returns the number
/// of rows changed (0 when `id` does not exist).
pub fn update(db: &Database, id: i64, values: &RequestValues) -> Result<usize, DatabaseError> {
    let now = Utc::now().to_rfc3339();
    db.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE request SET request_details = ?2, branch_id = ?3, dept_id = ?4, mis_id = ?5,
             updated_at = ?6
             WHERE id = ?1",
            params![
                id,
                values.details,
                values.branch_id,
                values.dept_id,
                values.mis_id,
                now
            ],
        )?;
        Ok(changed)
    })
}

/// Lists every request row in insertion order.
pub fn list_all(db: &Database) -> Result<Vec<RequestRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM request ORDER BY id")?;
        let rows = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}
