//! Store configuration for runtime backend selection.

use std::path::PathBuf;

use tracing::debug;

use super::cozo::CozoIndexStore;
use super::{DocumentStore, StoreError};

/// Which store a connection string resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Local CozoDB catalog with SQLite storage.
    CozoSqlite { path: PathBuf },

    /// Local CozoDB catalog with in-memory storage.
    CozoMem,
}

impl StoreConfig {
    /// Parse from a connection URL or file path.
    ///
    /// Supported formats:
    /// - `:memory:` → CozoMem
    /// - `sqlite:///path/to/catalog` → CozoSqlite
    /// - `./path/to/catalog.sqlite` or `/absolute/path` → CozoSqlite
    ///
    /// Any other `scheme://` (including `mongodb://` and `mongodb+srv://`)
    /// is rejected with `StoreError::UnsupportedScheme`.
    pub fn from_url(url: &str) -> Result<Self, StoreError> {
        if url == ":memory:" {
            return Ok(Self::CozoMem);
        }

        if let Some(path) = url.strip_prefix("sqlite://") {
            return Ok(Self::CozoSqlite {
                path: PathBuf::from(path),
            });
        }

        if let Some((scheme, _)) = url.split_once("://") {
            return Err(StoreError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        }

        Ok(Self::CozoSqlite {
            path: PathBuf::from(url),
        })
    }

    /// Open the store this configuration points at.
    pub fn connect(&self) -> Result<Box<dyn DocumentStore>, StoreError> {
        let store = match self {
            Self::CozoSqlite { path } => CozoIndexStore::open(path)?,
            Self::CozoMem => CozoIndexStore::open_mem()?,
        };
        debug!(backend = store.backend_name(), "store connected");
        Ok(Box::new(store))
    }
}
