//! Department store contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `department` table.
//!
//! # Invariants
//! - `insert` writes the generated key back into the entity.
//! - `update` of an id that matches no row is a no-op, not an error.
//! - Deleting a department still referenced by sellers yields
//!   `StoreErrorKind::Integrity` and leaves the row in place.

use crate::db::{close_result, close_statement};
use crate::model::department::{Department, DepartmentId};
use crate::store::{classify_delete_error, StoreError, StoreResult};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};

/// Data-access contract for departments.
pub trait DepartmentStore {
    fn insert(&self, department: &mut Department) -> StoreResult<()>;
    fn update(&self, department: &Department) -> StoreResult<()>;
    fn delete_by_id(&self, id: DepartmentId) -> StoreResult<()>;
    fn find_by_id(&self, id: DepartmentId) -> StoreResult<Option<Department>>;
    /// All departments ordered by name ascending.
    fn find_all(&self) -> StoreResult<Vec<Department>>;
}

/// SQLite-backed department store over a borrowed shared connection.
pub struct SqliteDepartmentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentStore for SqliteDepartmentStore<'_> {
    fn insert(&self, department: &mut Department) -> StoreResult<()> {
        let changed = self.conn.execute(
            "INSERT INTO department (Name) VALUES (?1)",
            params![department.name.as_str()],
        )?;
        if changed == 0 {
            warn!("event=department_insert module=store status=error error_code=no_rows_affected");
            return Err(StoreError::NoRowsAffected);
        }

        let id = self.conn.last_insert_rowid();
        department.id = Some(id);
        debug!("event=department_insert module=store status=ok id={id}");
        Ok(())
    }

    fn update(&self, department: &Department) -> StoreResult<()> {
        let id = department.id.ok_or(StoreError::MissingId)?;
        let changed = self.conn.execute(
            "UPDATE department SET Name = ?1 WHERE Id = ?2",
            params![department.name.as_str(), id],
        )?;
        debug!("event=department_update module=store status=ok id={id} changed={changed}");
        Ok(())
    }

    fn delete_by_id(&self, id: DepartmentId) -> StoreResult<()> {
        match self
            .conn
            .execute("DELETE FROM department WHERE Id = ?1", params![id])
        {
            Ok(changed) => {
                debug!("event=department_delete module=store status=ok id={id} changed={changed}");
                Ok(())
            }
            Err(err) => {
                let err = classify_delete_error(err);
                warn!(
                    "event=department_delete module=store status=error id={id} kind={:?}",
                    err.kind()
                );
                Err(err)
            }
        }
    }

    fn find_by_id(&self, id: DepartmentId) -> StoreResult<Option<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT Name, Id FROM department WHERE Id = ?1")?;
        let department = {
            let mut rows = stmt.query(params![id])?;
            let department = match rows.next()? {
                Some(row) => Some(parse_department_row(row)?),
                None => None,
            };
            close_result(Some(rows));
            department
        };
        close_statement(Some(stmt))?;
        Ok(department)
    }

    fn find_all(&self) -> StoreResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM department ORDER BY Name")?;
        let departments = {
            let mut rows = stmt.query([])?;
            let mut departments = Vec::new();
            while let Some(row) = rows.next()? {
                departments.push(parse_department_row(row)?);
            }
            close_result(Some(rows));
            departments
        };
        close_statement(Some(stmt))?;
        Ok(departments)
    }
}

fn parse_department_row(row: &Row<'_>) -> StoreResult<Department> {
    Ok(Department {
        id: Some(row.get("Id")?),
        name: row.get("Name")?,
    })
}
