//! Store layer: data-access contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Define one store contract per entity (`DepartmentStore`, `SellerStore`).
//! - Keep SQL and row mapping inside the persistence boundary.
//! - Translate driver failures into two coarse categories, storage and
//!   integrity.
//!
//! # Invariants
//! - Every store method returns its failure; none logs and swallows.
//! - `StoreErrorKind::Integrity` is reserved for deletes rejected by a
//!   foreign key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_store;
pub mod factory;
pub mod seller_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Coarse failure category surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Any database failure other than an integrity violation.
    Storage,
    /// A delete rejected because rows still reference the target.
    Integrity,
}

#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// An insert reported zero affected rows.
    NoRowsAffected,
    /// A delete matched no row.
    NotFound(i64),
    /// An update was requested for an entity that was never persisted.
    MissingId,
    /// A seller references a department without a key.
    MissingDepartmentId,
    InvalidData(String),
    Integrity(DbError),
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Integrity(_) => StoreErrorKind::Integrity,
            Self::Db(_)
            | Self::NoRowsAffected
            | Self::NotFound(_)
            | Self::MissingId
            | Self::MissingDepartmentId
            | Self::InvalidData(_) => StoreErrorKind::Storage,
        }
    }

    pub fn is_integrity(&self) -> bool {
        self.kind() == StoreErrorKind::Integrity
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "storage error: {err}"),
            Self::NoRowsAffected => write!(f, "storage error: unexpected error, no rows affected"),
            Self::NotFound(id) => write!(f, "storage error: nonexistent id {id}"),
            Self::MissingId => write!(f, "storage error: entity has no id"),
            Self::MissingDepartmentId => {
                write!(f, "storage error: seller department has no id")
            }
            Self::InvalidData(message) => {
                write!(f, "storage error: invalid persisted data: {message}")
            }
            Self::Integrity(err) => write!(f, "integrity error: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) | Self::Integrity(err) => Some(err),
            Self::NoRowsAffected
            | Self::NotFound(_)
            | Self::MissingId
            | Self::MissingDepartmentId
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a delete failure, routing foreign-key violations to `Integrity`.
pub(crate) fn classify_delete_error(err: rusqlite::Error) -> StoreError {
    if is_foreign_key_violation(&err) {
        StoreError::Integrity(DbError::Sqlite(err))
    } else {
        StoreError::from(err)
    }
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

#[cfg(test)]
mod tests {
    use super::{classify_delete_error, StoreError, StoreErrorKind};
    use rusqlite::ffi;

    fn sqlite_failure(extended_code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(extended_code), None)
    }

    #[test]
    fn foreign_key_failures_classify_as_integrity() {
        let err = classify_delete_error(sqlite_failure(ffi::SQLITE_CONSTRAINT_FOREIGNKEY));
        assert_eq!(err.kind(), StoreErrorKind::Integrity);
        assert!(err.to_string().starts_with("integrity error"));
    }

    #[test]
    fn other_failures_classify_as_storage() {
        let err = classify_delete_error(sqlite_failure(ffi::SQLITE_BUSY));
        assert_eq!(err.kind(), StoreErrorKind::Storage);
        assert!(matches!(err, StoreError::Db(_)));

        assert_eq!(StoreError::NotFound(9).kind(), StoreErrorKind::Storage);
        assert_eq!(StoreError::NoRowsAffected.kind(), StoreErrorKind::Storage);
    }
}
