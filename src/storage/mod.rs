//! Document store abstraction and its backends.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::domain::recipe::RecipeId;
use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};

/// A schemaless document body. The identifier is the store key, never part of the body.
pub type Document = Map<String, JsonValue>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connection refused, pool exhausted, timeout).
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Contract every document store backend fulfils.
///
/// Stores do not enforce any schema; validation happens in the repository.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs.
    fn kind(&self) -> &'static str;

    /// Every document in insertion order.
    async fn list(&self) -> Result<Vec<(RecipeId, Document)>, StoreError>;

    async fn find(&self, id: RecipeId) -> Result<Option<Document>, StoreError>;

    /// Stores a new document under a freshly generated identifier.
    async fn insert(&self, document: Document) -> Result<RecipeId, StoreError>;

    /// Overwrites only the keys present in `patch`, leaving the others untouched.
    /// Returns the post-update document, or `None` if `id` does not exist.
    async fn merge(&self, id: RecipeId, patch: Document) -> Result<Option<Document>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: RecipeId) -> Result<bool, StoreError>;

    /// Cheap connectivity check used by the health endpoint and preflight.
    async fn ping(&self) -> Result<(), StoreError>;
}
