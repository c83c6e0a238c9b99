//! Drag-and-drop reorganization of recipes into categories.
//!
//! The organizer keeps an optimistic local view: moves apply immediately and
//! [`Organizer::persist`] pushes changed categories afterwards. Each update is
//! independent, failures are logged and left pending, and nothing is rolled
//! back. [`Organizer::reload`] resynchronizes with the store.

use crate::app::recipe_repository::RecipeRepository;
use crate::domain::recipe::{Recipe, RecipeId};
use crate::storage::Document;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Anything that can apply a merge update to a stored recipe.
#[async_trait]
pub trait RecipeWriter: Send + Sync {
    async fn update_recipe(&self, id: RecipeId, patch: Document) -> anyhow::Result<Recipe>;
}

#[async_trait]
impl RecipeWriter for RecipeRepository {
    async fn update_recipe(&self, id: RecipeId, patch: Document) -> anyhow::Result<Recipe> {
        Ok(self.update(&id.to_hex(), JsonValue::Object(patch)).await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrganizerError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("recipe {id} is not in category '{category}'")]
    UnknownRecipe { category: String, id: RecipeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Source and target coincide.
    Unchanged,
    /// Order changed within one category; nothing to persist.
    Reordered,
    /// The recipe now belongs to `to` and awaits persistence.
    Moved { id: RecipeId, to: String },
}

#[derive(Debug, Default)]
pub struct PersistReport {
    pub updated: Vec<RecipeId>,
    pub failed: Vec<(RecipeId, String)>,
}

impl PersistReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Column {
    name: String,
    recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Default)]
pub struct Organizer {
    columns: Vec<Column>,
    /// Category each recipe had when last read from or written to the store.
    persisted: HashMap<RecipeId, String>,
}

impl Organizer {
    /// Groups recipes by category, first-seen category order, list order within each.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let mut organizer = Self::default();
        organizer.load(recipes);
        organizer
    }

    fn load(&mut self, recipes: Vec<Recipe>) {
        self.columns.clear();
        self.persisted.clear();
        for recipe in recipes {
            self.persisted.insert(recipe.id, recipe.category.clone());
            match self.columns.iter_mut().find(|c| c.name == recipe.category) {
                Some(column) => column.recipes.push(recipe),
                None => self.columns.push(Column {
                    name: recipe.category.clone(),
                    recipes: vec![recipe],
                }),
            }
        }
    }

    /// Rebuilds from a fresh store listing. Local empty categories survive.
    pub fn reload(&mut self, recipes: Vec<Recipe>) {
        let local_only: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.recipes.is_empty())
            .map(|c| c.name.clone())
            .collect();
        self.load(recipes);
        for name in local_only {
            self.add_category(&name);
        }
    }

    pub fn categories(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn recipes(&self, category: &str) -> Option<&[Recipe]> {
        self.column(category).map(|c| c.recipes.as_slice())
    }

    fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn column_mut(&mut self, name: &str) -> Result<&mut Column, OrganizerError> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| OrganizerError::UnknownCategory(name.to_string()))
    }

    /// Adds an empty category. Returns `false` for blank or existing names.
    pub fn add_category(&mut self, name: &str) -> bool {
        if name.trim().is_empty() || self.column(name).is_some() {
            return false;
        }
        self.columns.push(Column {
            name: name.to_string(),
            recipes: Vec::new(),
        });
        true
    }

    /// Relocates a recipe inside its category. `target` is clamped to the last slot.
    pub fn move_within(
        &mut self,
        category: &str,
        id: RecipeId,
        target: usize,
    ) -> Result<MoveOutcome, OrganizerError> {
        let column = self.column_mut(category)?;
        let source = position(column, id)?;
        let target = target.min(column.recipes.len() - 1);
        if source == target {
            return Ok(MoveOutcome::Unchanged);
        }
        let recipe = column.recipes.remove(source);
        column.recipes.insert(target, recipe);
        Ok(MoveOutcome::Reordered)
    }

    /// Moves a recipe into another category at `target` (clamped to the end)
    /// and rewrites its `category` field.
    pub fn move_across(
        &mut self,
        id: RecipeId,
        from: &str,
        to: &str,
        target: usize,
    ) -> Result<MoveOutcome, OrganizerError> {
        if from == to {
            return self.move_within(from, id, target);
        }
        // Validate both ends before mutating anything.
        self.column_mut(to)?;
        let source = self.column_mut(from)?;
        let index = position(source, id)?;
        let mut recipe = source.recipes.remove(index);
        recipe.category = to.to_string();

        let destination = self.column_mut(to)?;
        let target = target.min(destination.recipes.len());
        destination.recipes.insert(target, recipe);
        Ok(MoveOutcome::Moved {
            id,
            to: to.to_string(),
        })
    }

    /// One `{category}` patch per recipe whose category differs from the stored one.
    pub fn pending_updates(&self) -> Vec<(RecipeId, Document)> {
        self.columns
            .iter()
            .flat_map(|c| c.recipes.iter())
            .filter(|r| self.persisted.get(&r.id) != Some(&r.category))
            .map(|r| {
                let mut patch = Document::new();
                patch.insert("category".to_string(), JsonValue::String(r.category.clone()));
                (r.id, patch)
            })
            .collect()
    }

    /// Issues every pending update concurrently, with no ordering between them.
    pub async fn persist(&mut self, writer: Arc<dyn RecipeWriter>) -> PersistReport {
        let mut tasks = JoinSet::new();
        let mut outstanding = Vec::new();
        for (id, patch) in self.pending_updates() {
            outstanding.push(id);
            let writer = writer.clone();
            tasks.spawn(async move {
                let result = writer.update_recipe(id, patch).await;
                (id, result)
            });
        }

        let mut report = PersistReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(stored))) => {
                    self.persisted.insert(id, stored.category);
                    report.updated.push(id);
                }
                Ok((id, Err(e))) => {
                    warn!(%id, error = %e, "failed to persist recipe category");
                    report.failed.push((id, e.to_string()));
                }
                Err(e) => error!(error = %e, "category update task aborted"),
            }
        }
        // A panicked task loses its id with it; whatever was not settled above failed.
        for id in outstanding {
            if !report.updated.contains(&id) && !report.failed.iter().any(|(f, _)| *f == id) {
                report.failed.push((id, "update task aborted".to_string()));
            }
        }
        info!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "organization saved"
        );
        report
    }
}

fn position(column: &Column, id: RecipeId) -> Result<usize, OrganizerError> {
    column
        .recipes
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| OrganizerError::UnknownRecipe {
            category: column.name.clone(),
            id,
        })
}
