//! Document-store boundary for index submission.
//!
//! The `create-index` command talks to the store only through the
//! `DocumentStore` trait. A network driver plugs in by implementing it; this
//! build ships `CozoIndexStore`, which records index definitions in a local
//! CozoDB catalog (SQLite-backed or in-memory).
//!
//! Connection strings are resolved by `StoreConfig::from_url`.

mod config;
mod cozo;

pub use config::StoreConfig;
pub use cozo::{CozoIndexStore, StoredIndex};

use thiserror::Error;

use crate::schema::IndexDeclaration;

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unsupported connection scheme '{scheme}': no driver for it in this build")]
    UnsupportedScheme { scheme: String },

    #[error("Failed to open store '{target}': {message}")]
    OpenFailed { target: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },
}

/// A store that can receive index definitions.
pub trait DocumentStore: Send + Sync {
    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Create (or update) every index in `indexes` on one collection.
    ///
    /// Returns the number of indexes submitted.
    fn create_indexes(
        &self,
        database: &str,
        collection: &str,
        indexes: &[IndexDeclaration],
    ) -> Result<usize, StoreError>;
}

/// Hide credentials in a connection string: `scheme://user:pw@host` becomes
/// `scheme://***@host`. Strings without credentials are returned unchanged.
pub fn mask_connection_string(connection: &str) -> String {
    match (connection.split_once("://"), connection.rsplit_once('@')) {
        (Some((scheme, _)), Some((_, host))) => format!("{}://***@{}", scheme, host),
        _ => connection.to_string(),
    }
}
