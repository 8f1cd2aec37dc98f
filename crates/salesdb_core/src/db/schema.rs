//! Table definitions for the `department`/`seller` store surface.
//!
//! # Responsibility
//! - Create the two tables on fresh databases (`apply_schema`).
//! - Check that an injected connection exposes every column stores read.
//!
//! # Invariants
//! - DDL is idempotent (`IF NOT EXISTS`); there is no versioning.
//! - `seller.DepartmentId` references `department.Id`.

use super::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

const DEPARTMENT_COLUMNS: &[&str] = &["Id", "Name"];
const SELLER_COLUMNS: &[&str] = &[
    "Id",
    "Name",
    "Email",
    "BirthDate",
    "BaseSalary",
    "DepartmentId",
];

/// Creates the department and seller tables when absent.
pub fn apply_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Verifies the connection has the tables and columns stores depend on.
///
/// # Errors
/// - `MissingRequiredTable` / `MissingRequiredColumn` naming the first gap.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    for (table, columns) in [("department", DEPARTMENT_COLUMNS), ("seller", SELLER_COLUMNS)] {
        if !table_exists(conn, table)? {
            return Err(DbError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(DbError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}
