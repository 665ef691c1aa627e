//! Lookup repository: read access to the branch, department and MIS name tables.

use super::{Database, DatabaseError};
use crate::model::{LookupEntry, LookupKind};

/// Lists every entry of a lookup table, ordered by id.
pub fn list(db: &Database, kind: LookupKind) -> Result<Vec<LookupEntry>, DatabaseError> {
    db.with_conn(|conn| {
        let sql = format!(
            "SELECT {id}, {name} FROM {table} ORDER BY {id}",
            id = kind.id_key(),
            name = kind.name_key(),
            table = kind.table()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| Ok(LookupEntry::new(row.get(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}
