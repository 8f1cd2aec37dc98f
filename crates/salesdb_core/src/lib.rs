//! Data-access core for departments and the sellers that belong to them.
//!
//! Callers own a [`ConnectionProvider`], bind a [`StoreFactory`] to it and
//! work through the [`DepartmentStore`] / [`SellerStore`] contracts.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{load_properties, ConfigError, DbConfig, DbTarget, DEFAULT_PROPERTIES_FILE};
pub use db::{ConnectionProvider, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentId};
pub use model::seller::{Seller, SellerId};
pub use store::department_store::{DepartmentStore, SqliteDepartmentStore};
pub use store::factory::StoreFactory;
pub use store::seller_store::{SellerStore, SqliteSellerStore};
pub use store::{StoreError, StoreErrorKind, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
