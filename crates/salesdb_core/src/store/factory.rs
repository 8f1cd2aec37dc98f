//! Store construction behind the store contracts.
//!
//! # Responsibility
//! - Bind stores to the injected shared connection.
//! - Hide concrete store types from callers.

use crate::db::schema::ensure_schema;
use crate::db::ConnectionProvider;
use crate::store::department_store::{DepartmentStore, SqliteDepartmentStore};
use crate::store::seller_store::{SellerStore, SqliteSellerStore};
use crate::store::StoreResult;
use rusqlite::Connection;

/// Builds stores that share one connection.
#[derive(Clone, Copy)]
pub struct StoreFactory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> StoreFactory<'conn> {
    /// Binds the factory to `conn` without inspecting it.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Binds the factory after checking the required tables exist.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_schema(conn)?;
        Ok(Self::new(conn))
    }

    /// Binds the factory to the provider's connection, opening it if needed.
    pub fn from_provider(provider: &'conn ConnectionProvider) -> StoreResult<Self> {
        let conn = provider.get_connection()?;
        Self::try_new(conn)
    }

    pub fn create_department_store(&self) -> Box<dyn DepartmentStore + 'conn> {
        Box::new(SqliteDepartmentStore::new(self.conn))
    }

    pub fn create_seller_store(&self) -> Box<dyn SellerStore + 'conn> {
        Box::new(SqliteSellerStore::new(self.conn))
    }
}
