//! Lazily opened, explicitly owned database connection.
//!
//! # Responsibility
//! - Read configuration and open the connection on first request.
//! - Hand the same connection to every later caller.
//! - Release statement, row and connection handles on demand.
//!
//! # Invariants
//! - At most one live connection per provider.
//! - The provider is owned by the application entry point and injected
//!   into stores through `StoreFactory`; there is no global instance.
//! - `rusqlite::Connection` is `!Sync`, so a provider never crosses threads
//!   by reference.

use super::open::open_with_config;
use super::{DbError, DbResult};
use crate::config::{load_properties, DbConfig};
use log::{debug, info};
use once_cell::unsync::OnceCell;
use rusqlite::{Connection, Rows, Statement};
use std::path::PathBuf;

#[derive(Debug, Clone)]
enum ConfigSource {
    Properties(PathBuf),
    Inline(DbConfig),
}

/// Owner of the single shared connection.
pub struct ConnectionProvider {
    source: ConfigSource,
    conn: OnceCell<Connection>,
}

impl ConnectionProvider {
    /// Provider that reads `path` the first time a connection is requested.
    pub fn from_properties(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ConfigSource::Properties(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Provider over an already loaded configuration.
    pub fn new(config: DbConfig) -> Self {
        Self {
            source: ConfigSource::Inline(config),
            conn: OnceCell::new(),
        }
    }

    /// Provider over a private in-memory database with the schema applied.
    pub fn in_memory() -> Self {
        Self::new(DbConfig::in_memory())
    }

    /// Returns the shared connection, opening it on first use.
    ///
    /// # Errors
    /// - `DbError::Config` when the properties source cannot be read.
    /// - `DbError::Sqlite` when the connection cannot be opened.
    pub fn get_connection(&self) -> DbResult<&Connection> {
        if let Some(conn) = self.conn.get() {
            debug!("event=connection_get module=db status=ok reused=true");
            return Ok(conn);
        }
        self.conn.get_or_try_init(|| self.connect())
    }

    /// Returns whether a connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Closes the shared connection, if one is open.
    ///
    /// A later `get_connection` opens a fresh connection.
    pub fn close_connection(&mut self) -> DbResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
        info!("event=connection_close module=db status=ok");
        Ok(())
    }

    fn connect(&self) -> DbResult<Connection> {
        let config = match &self.source {
            ConfigSource::Properties(path) => {
                debug!(
                    "event=config_load module=db status=start path={}",
                    path.display()
                );
                load_properties(path)?
            }
            ConfigSource::Inline(config) => config.clone(),
        };
        let conn = open_with_config(&config)?;
        info!("event=connection_open module=db status=ok");
        Ok(conn)
    }
}

/// Finalizes a prepared statement; `None` is accepted and ignored.
pub fn close_statement(stmt: Option<Statement<'_>>) -> DbResult<()> {
    if let Some(stmt) = stmt {
        stmt.finalize()?;
    }
    Ok(())
}

/// Releases a result cursor; `None` is accepted and ignored.
///
/// Dropping `Rows` resets the owning statement, which cannot fail.
pub fn close_result(rows: Option<Rows<'_>>) {
    drop(rows);
}
