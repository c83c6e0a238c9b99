pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::error::RepositoryError;
pub use app::recipe_repository::{CreatedRecipe, RecipeRepository};
pub use domain::catalog::RecipeFilter;
pub use domain::organizer::{Organizer, RecipeWriter};
pub use domain::recipe::{Recipe, RecipeId};
pub use domain::validation::{validate, FieldErrors};
pub use storage::{DocumentStore, MemoryStore, PostgresStore};
pub use transport::client::RecipeClient;
