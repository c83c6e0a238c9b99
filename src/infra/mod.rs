pub mod config;
pub mod logging;

use crate::app::recipe_repository::RecipeRepository;
use crate::storage::{DocumentStore, MemoryStore, PostgresStore, StoreError};
use config::{Config, StoreKind};
use std::sync::Arc;
use tracing::info;

/// Opens the configured document store and wraps it in a repository.
pub async fn open_repository(config: &Config) -> Result<RecipeRepository, StoreError> {
    let store: Arc<dyn DocumentStore> = match (config.store, config.database_url.as_deref()) {
        (StoreKind::Postgres, Some(url)) => Arc::new(
            PostgresStore::connect(url, config.db_max_connections, config.store_timeout)?,
        ),
        (StoreKind::Postgres, None) => {
            return Err(StoreError::Unavailable("DATABASE_URL is not set".to_string()))
        }
        (StoreKind::Memory, _) => Arc::new(MemoryStore::new()),
    };
    info!(store = store.kind(), "document store ready");
    Ok(RecipeRepository::new(store).with_timeout(config.store_timeout))
}
