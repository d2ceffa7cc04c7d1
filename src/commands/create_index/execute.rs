use std::error::Error;

use serde::Serialize;
use tracing::{info, warn};

use super::CreateIndexCmd;
use crate::catalog;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::schema::{extract_indices, SchemaRegistry};
use crate::store::{mask_connection_string, DocumentStore, StoreConfig};

/// Outcome of index submission for one collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionIndexOutcome {
    pub collection: String,
    /// Indexes submitted, the default `_id_` index included
    pub index_count: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of the create-index command execution
#[derive(Debug, Clone, Serialize)]
pub struct CreateIndexResult {
    /// Connection string with credentials masked
    pub connection: String,
    pub database: String,
    pub backend: String,
    pub collections: Vec<CollectionIndexOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Submit the indexes of every indexable model, one collection at a time.
///
/// A failing collection is recorded and the rest are still attempted.
pub fn submit_indexes(
    store: &dyn DocumentStore,
    registry: &SchemaRegistry,
    database: &str,
) -> Vec<CollectionIndexOutcome> {
    registry
        .models()
        .iter()
        .filter(|model| model.is_indexable())
        .map(|model| {
            let indexes = extract_indices(model);
            match store.create_indexes(database, model.collection_name, &indexes) {
                Ok(count) => {
                    info!(collection = model.collection_name, count, "indexes created");
                    CollectionIndexOutcome {
                        collection: model.collection_name.to_string(),
                        index_count: count,
                        success: true,
                        error: None,
                    }
                }
                Err(e) => {
                    warn!(collection = model.collection_name, error = %e, "index creation failed");
                    CollectionIndexOutcome {
                        collection: model.collection_name.to_string(),
                        index_count: indexes.len(),
                        success: false,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}

impl Execute for CreateIndexCmd {
    type Output = CreateIndexResult;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let masked = mask_connection_string(&self.connection);
        info!(connection = %masked, database = %self.database, "connecting to store");

        let store = StoreConfig::from_url(&self.connection)?.connect()?;
        let registry = catalog::registry(&config.introspection)?;

        let collections = submit_indexes(store.as_ref(), &registry, &self.database);
        let succeeded = collections.iter().filter(|c| c.success).count();
        let failed = collections.len() - succeeded;

        Ok(CreateIndexResult {
            connection: masked,
            database: self.database,
            backend: store.backend_name().to_string(),
            collections,
            succeeded,
            failed,
        })
    }
}
