//! The recipe repository.
//!
//! This is the single gate between callers and the document store:
//! 1.  Identifiers are parsed before any store access.
//! 2.  Every write runs the validation rules; nothing malformed is persisted.
//! 3.  Store calls are bounded by a timeout and mapped onto `RepositoryError`.

use crate::app::error::RepositoryError;
use crate::domain::catalog;
use crate::domain::recipe::{coerce_numeric_fields, strip_identifier, Recipe, RecipeId};
use crate::domain::validation::{validate, validate_present};
use crate::storage::{Document, DocumentStore, StoreError};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

const CREATED_AT: &str = "createdAt";

/// Result of a successful create.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRecipe {
    pub message: String,
    pub recipe_id: RecipeId,
}

#[derive(Clone)]
pub struct RecipeRepository {
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn call<T, F>(&self, op: &'static str, fut: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => {
                warn!(op, store = self.store.kind(), error = %e, "store call failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(op, store = self.store.kind(), timeout = ?self.timeout, "store call timed out");
                Err(RepositoryError::StoreUnavailable(format!(
                    "{} timed out after {:?}",
                    op, self.timeout
                )))
            }
        }
    }

    fn parse_id(id: &str) -> Result<RecipeId, RepositoryError> {
        RecipeId::parse(id).map_err(|_| RepositoryError::InvalidIdentifier(id.to_string()))
    }

    fn into_payload(payload: JsonValue) -> Result<Document, RepositoryError> {
        match payload {
            JsonValue::Object(mut map) => {
                strip_identifier(&mut map);
                // Server-populated.
                map.remove(CREATED_AT);
                coerce_numeric_fields(&mut map);
                Ok(map)
            }
            _ => Err(RepositoryError::InvalidPayload),
        }
    }

    fn to_recipe(id: RecipeId, document: Document) -> Result<Recipe, RepositoryError> {
        Recipe::from_document(id, document).map_err(|e| {
            RepositoryError::Store(anyhow::anyhow!("stored recipe {} is malformed: {}", id, e))
        })
    }

    /// All recipes in store order.
    pub async fn list(&self) -> Result<Vec<Recipe>, RepositoryError> {
        let documents = self.call("list", self.store.list()).await?;
        debug!(count = documents.len(), "listed recipes");
        documents
            .into_iter()
            .map(|(id, document)| Self::to_recipe(id, document))
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Recipe, RepositoryError> {
        let id = Self::parse_id(id)?;
        match self.call("find", self.store.find(id)).await? {
            Some(document) => Self::to_recipe(id, document),
            None => Err(RepositoryError::NotFound),
        }
    }

    pub async fn create(&self, payload: JsonValue) -> Result<CreatedRecipe, RepositoryError> {
        let mut document = Self::into_payload(payload)?;
        let errors = validate(&document);
        if !errors.is_empty() {
            return Err(RepositoryError::ValidationFailed(errors));
        }
        document.entry("rating").or_insert_with(|| JsonValue::from(0));
        document.insert(
            CREATED_AT.to_string(),
            JsonValue::String(chrono::Utc::now().to_rfc3339()),
        );

        let id = self.call("insert", self.store.insert(document)).await?;
        info!(%id, "recipe created");
        Ok(CreatedRecipe {
            message: "Recipe created successfully".to_string(),
            recipe_id: id,
        })
    }

    /// Merge update: keys in `payload` overwrite, all other stored keys stay.
    ///
    /// Fields carried by the payload are checked before the store is touched;
    /// the merged document must then pass the full rule set.
    pub async fn update(&self, id: &str, payload: JsonValue) -> Result<Recipe, RepositoryError> {
        let id = Self::parse_id(id)?;
        let patch = Self::into_payload(payload)?;
        let errors = validate_present(&patch);
        if !errors.is_empty() {
            return Err(RepositoryError::ValidationFailed(errors));
        }

        let Some(mut merged) = self.call("find", self.store.find(id)).await? else {
            return Err(RepositoryError::NotFound);
        };
        for (key, value) in &patch {
            merged.insert(key.clone(), value.clone());
        }
        let errors = validate(&merged);
        if !errors.is_empty() {
            return Err(RepositoryError::ValidationFailed(errors));
        }

        match self.call("merge", self.store.merge(id, patch)).await? {
            Some(document) => {
                info!(%id, "recipe updated");
                Self::to_recipe(id, document)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let id = Self::parse_id(id)?;
        if self.call("delete", self.store.delete(id)).await? {
            info!(%id, "recipe deleted");
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    /// Distinct categories, derived from the current recipe list.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(catalog::categories(&self.list().await?))
    }

    pub async fn random(&self) -> Result<Option<Recipe>, RepositoryError> {
        let recipes = self.list().await?;
        Ok(catalog::pick_random(&recipes).cloned())
    }

    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.call("ping", self.store.ping()).await
    }
}
