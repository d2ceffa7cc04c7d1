//! CozoDB-backed index catalog.
//!
//! Index definitions are kept in one stored relation keyed by
//! `(database, collection, name)`. Re-submitting an index with the same name
//! replaces its keys and options, so repeated `create-index` runs are
//! idempotent.

use std::collections::BTreeMap;
use std::path::Path;

use cozo::{DataValue, DbInstance, NamedRows, ScriptMutability};
use serde::Deserialize;
use tracing::{debug, info};

use super::{DocumentStore, StoreError};
use crate::schema::{IndexDeclaration, IndexKey};

type Params = BTreeMap<String, DataValue>;

const CATALOG_SCHEMA: &str = r#"
:create index_catalog {
    database: String,
    collection: String,
    name: String
    =>
    keys: String,
    options: String
}
"#;

/// One row of the index catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredIndex {
    pub name: String,
    /// JSON array of `{field, direction}` objects.
    pub keys: String,
    /// JSON object of rendered option values.
    pub options: String,
}

pub struct CozoIndexStore {
    inner: DbInstance,
    backend: &'static str,
}

impl CozoIndexStore {
    /// Opens a SQLite-backed catalog at `path`, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let inner = DbInstance::new("sqlite", path, "").map_err(|e| StoreError::OpenFailed {
            target: path.display().to_string(),
            message: format!("{:?}", e),
        })?;
        Self::with_instance(inner, "cozo-sqlite")
    }

    /// Opens an in-memory catalog.
    pub fn open_mem() -> Result<Self, StoreError> {
        let inner = DbInstance::new("mem", "", "").map_err(|e| StoreError::OpenFailed {
            target: ":memory:".to_string(),
            message: format!("{:?}", e),
        })?;
        Self::with_instance(inner, "cozo-mem")
    }

    fn with_instance(inner: DbInstance, backend: &'static str) -> Result<Self, StoreError> {
        let store = Self { inner, backend };
        if store.try_create_relation(CATALOG_SCHEMA)? {
            info!(backend, "created index_catalog relation");
        }
        Ok(store)
    }

    /// Run a script, treating "relation already exists" as success.
    ///
    /// Returns `true` when the relation was created.
    fn try_create_relation(&self, script: &str) -> Result<bool, StoreError> {
        match self.run(script, Params::new()) {
            Ok(_) => Ok(true),
            Err(StoreError::QueryFailed { message })
                if message.contains("AlreadyExists") || message.contains("stored_relation_conflict") =>
            {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn run(&self, script: &str, params: Params) -> Result<NamedRows, StoreError> {
        self.inner
            .run_script(script, params, ScriptMutability::Mutable)
            .map_err(|e| StoreError::QueryFailed {
                message: format!("{:?}", e),
            })
    }

    /// Indexes recorded for one collection, ordered by name.
    pub fn list_indexes(&self, database: &str, collection: &str) -> Result<Vec<StoredIndex>, StoreError> {
        let script = r#"
            ?[name, keys, options] :=
                *index_catalog{database, collection, name, keys, options},
                database == $database,
                collection == $collection
            :order name
        "#;

        let mut params = Params::new();
        params.insert("database".to_string(), DataValue::Str(database.into()));
        params.insert("collection".to_string(), DataValue::Str(collection.into()));

        let rows = self.run(script, params)?;
        Ok(rows
            .rows
            .into_iter()
            .filter_map(|row| match row.as_slice() {
                [DataValue::Str(name), DataValue::Str(keys), DataValue::Str(options)] => Some(StoredIndex {
                    name: name.to_string(),
                    keys: keys.to_string(),
                    options: options.to_string(),
                }),
                _ => None,
            })
            .collect())
    }
}

impl DocumentStore for CozoIndexStore {
    fn backend_name(&self) -> &'static str {
        self.backend
    }

    fn create_indexes(
        &self,
        database: &str,
        collection: &str,
        indexes: &[IndexDeclaration],
    ) -> Result<usize, StoreError> {
        if indexes.is_empty() {
            return Ok(0);
        }

        let rows = indexes
            .iter()
            .map(|index| {
                Ok(format!(
                    "[{}, {}, {}, {}, {}]",
                    quote(database),
                    quote(collection),
                    quote(&index.name),
                    quote(&encode_keys(&index.keys)?),
                    quote(&encode_options(index)?),
                ))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let script = format!(
            r#"
            ?[database, collection, name, keys, options] <- [{rows}]
            :put index_catalog {{database, collection, name => keys, options}}
            "#,
            rows = rows.join(", ")
        );

        self.run(&script, Params::new())?;
        debug!(database, collection, count = indexes.len(), "indexes stored");
        Ok(indexes.len())
    }
}

fn encode_keys(keys: &[IndexKey]) -> Result<String, StoreError> {
    serde_json::to_string(keys).map_err(|e| StoreError::QueryFailed {
        message: format!("Failed to encode index keys: {}", e),
    })
}

fn encode_options(index: &IndexDeclaration) -> Result<String, StoreError> {
    serde_json::to_string(&index.options.to_option_map()).map_err(|e| StoreError::QueryFailed {
        message: format!("Failed to encode index options: {}", e),
    })
}

/// A double-quoted, escaped string literal accepted by CozoScript.
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
