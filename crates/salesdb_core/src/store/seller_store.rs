//! Seller store contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `seller` table, reading sellers joined with their
//!   department.
//!
//! # Invariants
//! - `delete_by_id` of a nonexistent id fails with `StoreError::NotFound`.
//! - List queries are ordered by seller name ascending.
//! - Within one list call, sellers with the same department id share one
//!   `Rc<Department>`. The lookup map lives only for that call.

use crate::db::{close_result, close_statement};
use crate::model::department::{Department, DepartmentId};
use crate::model::seller::{Seller, SellerId};
use crate::store::{StoreError, StoreResult};
use chrono::NaiveDate;
use log::{debug, warn};
use rusqlite::{params, Connection, Params, Row};
use std::collections::HashMap;
use std::rc::Rc;

const SELLER_JOIN_SQL: &str = "SELECT seller.*, department.Name as DepName
FROM seller INNER JOIN department
ON seller.DepartmentId = department.Id";

/// Data-access contract for sellers.
pub trait SellerStore {
    fn insert(&self, seller: &mut Seller) -> StoreResult<()>;
    /// Rewrites every column of the seller row; no existence check.
    fn update(&self, seller: &Seller) -> StoreResult<()>;
    fn delete_by_id(&self, id: SellerId) -> StoreResult<()>;
    fn find_by_id(&self, id: SellerId) -> StoreResult<Option<Seller>>;
    /// All sellers ordered by name, departments shared per id.
    fn find_all(&self) -> StoreResult<Vec<Seller>>;
    /// Sellers of one department ordered by name.
    fn find_by_department(&self, department: &Department) -> StoreResult<Vec<Seller>>;
}

/// SQLite-backed seller store over a borrowed shared connection.
pub struct SqliteSellerStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSellerStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_sellers(&self, sql: &str, params: impl Params) -> StoreResult<Vec<Seller>> {
        let mut stmt = self.conn.prepare(sql)?;
        let sellers = {
            let mut rows = stmt.query(params)?;
            let mut departments: HashMap<DepartmentId, Rc<Department>> = HashMap::new();
            let mut sellers = Vec::new();
            while let Some(row) = rows.next()? {
                let department_id: DepartmentId = row.get("DepartmentId")?;
                let department = match departments.get(&department_id) {
                    Some(shared) => Rc::clone(shared),
                    None => {
                        let shared = Rc::new(parse_joined_department(row)?);
                        departments.insert(department_id, Rc::clone(&shared));
                        shared
                    }
                };
                sellers.push(parse_seller_row(row, department)?);
            }
            close_result(Some(rows));
            sellers
        };
        close_statement(Some(stmt))?;
        Ok(sellers)
    }
}

impl SellerStore for SqliteSellerStore<'_> {
    fn insert(&self, seller: &mut Seller) -> StoreResult<()> {
        let department_id = seller
            .department_id()
            .ok_or(StoreError::MissingDepartmentId)?;

        let changed = self.conn.execute(
            "INSERT INTO seller (Name, Email, BirthDate, BaseSalary, DepartmentId)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                seller.name.as_str(),
                seller.email.as_str(),
                seller.birth_date,
                seller.base_salary,
                department_id,
            ],
        )?;
        if changed == 0 {
            warn!("event=seller_insert module=store status=error error_code=no_rows_affected");
            return Err(StoreError::NoRowsAffected);
        }

        let id = self.conn.last_insert_rowid();
        seller.id = Some(id);
        debug!("event=seller_insert module=store status=ok id={id} department_id={department_id}");
        Ok(())
    }

    fn update(&self, seller: &Seller) -> StoreResult<()> {
        let id = seller.id.ok_or(StoreError::MissingId)?;
        let department_id = seller
            .department_id()
            .ok_or(StoreError::MissingDepartmentId)?;

        let changed = self.conn.execute(
            "UPDATE seller
             SET Name = ?1, Email = ?2, BirthDate = ?3, BaseSalary = ?4, DepartmentId = ?5
             WHERE Id = ?6",
            params![
                seller.name.as_str(),
                seller.email.as_str(),
                seller.birth_date,
                seller.base_salary,
                department_id,
                id,
            ],
        )?;
        debug!("event=seller_update module=store status=ok id={id} changed={changed}");
        Ok(())
    }

    fn delete_by_id(&self, id: SellerId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM seller WHERE Id = ?1", params![id])?;
        if changed == 0 {
            warn!("event=seller_delete module=store status=error id={id} error_code=not_found");
            return Err(StoreError::NotFound(id));
        }
        debug!("event=seller_delete module=store status=ok id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: SellerId) -> StoreResult<Option<Seller>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELLER_JOIN_SQL}\nWHERE seller.Id = ?1"))?;
        let seller = {
            let mut rows = stmt.query(params![id])?;
            let seller = match rows.next()? {
                Some(row) => {
                    let department = Rc::new(parse_joined_department(row)?);
                    Some(parse_seller_row(row, department)?)
                }
                None => None,
            };
            close_result(Some(rows));
            seller
        };
        close_statement(Some(stmt))?;
        Ok(seller)
    }

    fn find_all(&self) -> StoreResult<Vec<Seller>> {
        // `seller.Name`: a bare `Name` is ambiguous across the join in SQLite.
        self.query_sellers(&format!("{SELLER_JOIN_SQL}\nORDER BY seller.Name"), [])
    }

    fn find_by_department(&self, department: &Department) -> StoreResult<Vec<Seller>> {
        let department_id = department.id.ok_or(StoreError::MissingDepartmentId)?;
        self.query_sellers(
            &format!("{SELLER_JOIN_SQL}\nWHERE DepartmentId = ?1\nORDER BY seller.Name"),
            params![department_id],
        )
    }
}

fn parse_joined_department(row: &Row<'_>) -> StoreResult<Department> {
    Ok(Department {
        id: Some(row.get("DepartmentId")?),
        name: row.get("DepName")?,
    })
}

fn parse_seller_row(row: &Row<'_>, department: Rc<Department>) -> StoreResult<Seller> {
    let birth_date: NaiveDate = row.get("BirthDate").map_err(|err| match err {
        rusqlite::Error::FromSqlConversionFailure(_, _, source) => {
            StoreError::InvalidData(format!("invalid date in seller.BirthDate: {source}"))
        }
        other => StoreError::from(other),
    })?;

    Ok(Seller {
        id: Some(row.get("Id")?),
        name: row.get("Name")?,
        email: row.get("Email")?,
        birth_date,
        base_salary: row.get("BaseSalary")?,
        department,
    })
}
