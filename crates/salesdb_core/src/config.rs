//! Database configuration loaded from a key-value properties file.
//!
//! # Responsibility
//! - Read Java-style `db.properties` files (`key=value` or `key: value`,
//!   `#`/`!` comments). Values are taken literally, `$` included.
//! - Resolve the `dburl` connection string into an open target.
//!
//! # Invariants
//! - `dburl` is required; credentials are optional.
//! - Credentials are never included in `Debug`/`Display` output or logs.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Properties file looked up when callers do not pass an explicit path.
pub const DEFAULT_PROPERTIES_FILE: &str = "db.properties";

const KEY_URL: &str = "dburl";
const KEY_USER: &str = "user";
const KEY_PASSWORD: &str = "password";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, message: String },
    MissingKey(&'static str),
    InvalidUrl(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "failed to read properties `{}`: {message}", path.display())
            }
            Self::MissingKey(key) => write!(f, "missing required property `{key}`"),
            Self::InvalidUrl(url) => write!(f, "unsupported database url `{url}`"),
        }
    }
}

impl Error for ConfigError {}

/// Where a connection should be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    Memory,
    File(PathBuf),
}

/// Connection settings read from the properties source.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url)
            .field("user", &self.user.as_ref().map(|_| "<set>"))
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
        }
    }

    /// Config for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Resolves `url` into a memory or file target.
    ///
    /// Accepts `sqlite::memory:`, `:memory:`, `sqlite://<path>`,
    /// `sqlite:<path>` and bare paths.
    pub fn target(&self) -> ConfigResult<DbTarget> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidUrl(self.url.clone()));
        }
        if url == ":memory:" || url == "sqlite::memory:" {
            return Ok(DbTarget::Memory);
        }

        let path = if let Some(rest) = url.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = url.strip_prefix("sqlite:") {
            rest
        } else if url.contains("://") {
            // Other drivers (mysql://, postgres://) are not linked in.
            return Err(ConfigError::InvalidUrl(self.url.clone()));
        } else {
            url
        };

        if path.is_empty() {
            return Err(ConfigError::InvalidUrl(self.url.clone()));
        }
        Ok(DbTarget::File(PathBuf::from(path)))
    }
}

/// Loads `DbConfig` from a properties file.
///
/// # Errors
/// - `Read` when the file is missing or a line cannot be parsed.
/// - `MissingKey("dburl")` when no connection string is present.
pub fn load_properties(path: impl AsRef<Path>) -> ConfigResult<DbConfig> {
    let path = path.as_ref();
    let read_error = |message: String| ConfigError::Read {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|err| read_error(err.to_string()))?;
    let mut entries = java_properties::read(BufReader::new(file))
        .map_err(|err| read_error(err.to_string()))?;

    let url = entries
        .remove(KEY_URL)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingKey(KEY_URL))?;
    Ok(DbConfig {
        url,
        user: entries.remove(KEY_USER),
        password: entries.remove(KEY_PASSWORD),
    })
}

#[cfg(test)]
mod tests {
    use super::{load_properties, ConfigError, DbConfig, DbTarget};
    use std::io::Write;
    use std::path::PathBuf;

    fn write_properties(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        file.write_all(body.as_bytes())
            .expect("properties should be written");
        file
    }

    #[test]
    fn load_properties_reads_url_and_credentials() {
        let file = write_properties(
            "# local dev database\nuser=developer\npassword=secret\ndburl=sqlite://sales.db\n",
        );

        let config = load_properties(file.path()).expect("properties should load");
        assert_eq!(config.url, "sqlite://sales.db");
        assert_eq!(config.user.as_deref(), Some("developer"));
        assert_eq!(config.password.as_deref(), Some("secret"));
    }

    #[test]
    fn load_properties_keeps_dollar_signs_literal() {
        let file = write_properties("password=pa$$w0rd$HOME\ndburl=sqlite:///tmp/$HOME/x.db\n");

        let config = load_properties(file.path()).expect("properties should load");
        assert_eq!(config.url, "sqlite:///tmp/$HOME/x.db");
        assert_eq!(config.password.as_deref(), Some("pa$$w0rd$HOME"));
    }

    #[test]
    fn load_properties_accepts_colon_separator_and_bang_comments() {
        let file = write_properties("! credentials\nuser: dev\ndburl : sqlite::memory:\n");

        let config = load_properties(file.path()).expect("properties should load");
        assert_eq!(config.user.as_deref(), Some("dev"));
        assert_eq!(config.url, "sqlite::memory:");
        assert_eq!(config.target().unwrap(), DbTarget::Memory);
    }

    #[test]
    fn load_properties_requires_dburl() {
        let file = write_properties("user=developer\n");

        let err = load_properties(file.path()).expect_err("missing dburl must fail");
        assert!(matches!(err, ConfigError::MissingKey("dburl")));
    }

    #[test]
    fn load_properties_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let err = load_properties(dir.path().join("absent.properties"))
            .expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn target_resolves_supported_url_forms() {
        assert_eq!(DbConfig::in_memory().target().unwrap(), DbTarget::Memory);
        assert_eq!(DbConfig::new(":memory:").target().unwrap(), DbTarget::Memory);
        assert_eq!(
            DbConfig::new("sqlite://data/sales.db").target().unwrap(),
            DbTarget::File(PathBuf::from("data/sales.db"))
        );
        assert_eq!(
            DbConfig::new("sqlite:sales.db").target().unwrap(),
            DbTarget::File(PathBuf::from("sales.db"))
        );
        assert_eq!(
            DbConfig::new("/tmp/sales.db").target().unwrap(),
            DbTarget::File(PathBuf::from("/tmp/sales.db"))
        );
    }

    #[test]
    fn target_rejects_foreign_drivers_and_empty_urls() {
        assert!(matches!(
            DbConfig::new("mysql://localhost:3306/coursejdbc").target(),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            DbConfig::new("  ").target(),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            DbConfig::new("sqlite://").target(),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn debug_output_redacts_password() {
        let mut config = DbConfig::new("sqlite::memory:");
        config.password = Some("hunter2".to_string());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
