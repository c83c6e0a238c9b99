//! The recipe entity and its document representation.

pub mod id;

pub use id::{InvalidRecipeId, RecipeId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};

/// Document keys a client may use to smuggle an identifier into a payload.
pub const ID_FIELDS: &[&str] = &["id", "_id"];

/// Fields that must hold a positive number.
pub const NUMERIC_FIELDS: &[&str] = &["cookTime", "servings"];

/// A stored recipe, as returned by the repository.
///
/// Documents are schemaless, so any keys the typed fields do not cover are
/// kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub category: String,
    pub ingredients: String,
    pub instructions: String,
    pub cook_time: Number,
    pub servings: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Recipe {
    /// Builds a recipe from a stored document body and its store key.
    pub fn from_document(id: RecipeId, mut document: Map<String, JsonValue>) -> serde_json::Result<Self> {
        for key in ID_FIELDS {
            document.remove(*key);
        }
        document.insert("id".to_string(), JsonValue::String(id.to_hex()));
        serde_json::from_value(JsonValue::Object(document))
    }

    /// The document body without the identifier, as handed to a store.
    pub fn to_document(&self) -> Map<String, JsonValue> {
        let mut document = match serde_json::to_value(self) {
            Ok(JsonValue::Object(map)) => map,
            _ => Map::new(),
        };
        document.remove("id");
        document
    }

    pub fn ingredient_lines(&self) -> Vec<&str> {
        non_blank_lines(&self.ingredients)
    }

    pub fn instruction_steps(&self) -> Vec<&str> {
        non_blank_lines(&self.instructions)
    }
}

fn non_blank_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Removes any identifier keys from a client payload.
pub fn strip_identifier(payload: &mut Map<String, JsonValue>) {
    for key in ID_FIELDS {
        payload.remove(*key);
    }
}

/// Converts numeric strings (as submitted by HTML forms) in the numeric fields
/// into JSON numbers. Values that do not parse are left for validation to flag.
pub fn coerce_numeric_fields(payload: &mut Map<String, JsonValue>) {
    for field in NUMERIC_FIELDS {
        let Some(JsonValue::String(s)) = payload.get(*field) else {
            continue;
        };
        let trimmed = s.trim();
        let number = if let Ok(i) = trimmed.parse::<i64>() {
            Some(Number::from(i))
        } else {
            trimmed.parse::<f64>().ok().and_then(Number::from_f64)
        };
        if let Some(n) = number {
            payload.insert(field.to_string(), JsonValue::Number(n));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Map<String, JsonValue> {
        json!({
            "title": "Pancakes",
            "category": "Breakfast",
            "ingredients": "flour\nmilk\n\negg",
            "instructions": "Mix.\nCook.",
            "cookTime": 15,
            "servings": 2,
            "source": "grandma"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn document_roundtrip_keeps_unknown_keys() {
        let id = RecipeId::generate();
        let recipe = Recipe::from_document(id, document()).unwrap();
        assert_eq!(recipe.id, id);
        assert_eq!(recipe.rating, 0);
        assert_eq!(recipe.extra.get("source"), Some(&json!("grandma")));

        let body = recipe.to_document();
        assert!(!body.contains_key("id"));
        assert_eq!(body.get("source"), Some(&json!("grandma")));
        assert_eq!(body.get("cookTime"), Some(&json!(15)));
    }

    #[test]
    fn stored_identifier_keys_never_override_the_store_key() {
        let id = RecipeId::generate();
        let mut doc = document();
        doc.insert("_id".into(), json!("507f1f77bcf86cd799439011"));
        let recipe = Recipe::from_document(id, doc).unwrap();
        assert_eq!(recipe.id, id);
        assert!(!recipe.extra.contains_key("_id"));
    }

    #[test]
    fn splits_lines_dropping_blanks() {
        let recipe = Recipe::from_document(RecipeId::generate(), document()).unwrap();
        assert_eq!(recipe.ingredient_lines(), vec!["flour", "milk", "egg"]);
        assert_eq!(recipe.instruction_steps(), vec!["Mix.", "Cook."]);
    }

    #[test]
    fn coerces_numeric_strings() {
        let mut payload = json!({ "cookTime": " 15 ", "servings": "2.5", "title": "7" })
            .as_object()
            .cloned()
            .unwrap();
        coerce_numeric_fields(&mut payload);
        assert_eq!(payload["cookTime"], json!(15));
        assert_eq!(payload["servings"], json!(2.5));
        assert_eq!(payload["title"], json!("7"));
    }

    #[test]
    fn leaves_garbage_for_validation() {
        let mut payload = json!({ "cookTime": "soon" }).as_object().cloned().unwrap();
        coerce_numeric_fields(&mut payload);
        assert_eq!(payload["cookTime"], json!("soon"));
    }
}
