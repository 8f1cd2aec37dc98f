//! SQLite connection bootstrap, schema setup and connection ownership.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the store layer.
//! - Own the single shared connection through `ConnectionProvider`.
//! - Create the `department`/`seller` tables on request.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Stores never open connections themselves; callers inject one.

use crate::config::ConfigError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod provider;
pub mod schema;

pub use open::{open_db, open_db_in_memory, open_with_config};
pub use provider::{close_result, close_statement, ConnectionProvider};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Config(ConfigError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "connection is missing required column `{table}.{column}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<ConfigError> for DbError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}
