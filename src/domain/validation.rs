//! Recipe validation rules.
//!
//! The same rule set guards both creation and update. Every check runs, so the
//! caller receives all field errors at once.

use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Field name to human-readable error message.
pub type FieldErrors = BTreeMap<String, String>;

const REQUIRED_TEXT: &[(&str, &str)] = &[
    ("title", "Title is required"),
    ("category", "Category is required"),
    ("ingredients", "Ingredients are required"),
    ("instructions", "Instructions are required"),
];

const POSITIVE_NUMBERS: &[(&str, &str)] = &[
    ("cookTime", "Cook time must be a positive number"),
    ("servings", "Servings must be a positive number"),
];

pub const MAX_RATING: u64 = 5;
const RATING_MESSAGE: &str = "Rating must be a whole number between 0 and 5";
const IMAGE_URL_MESSAGE: &str = "Image URL must be text";

/// Validates a candidate recipe document. Empty result iff the candidate may be stored.
pub fn validate(candidate: &Map<String, JsonValue>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (field, message) in REQUIRED_TEXT {
        if !is_non_blank_text(candidate.get(*field)) {
            errors.insert(field.to_string(), message.to_string());
        }
    }

    for (field, message) in POSITIVE_NUMBERS {
        if !is_positive_number(candidate.get(*field)) {
            errors.insert(field.to_string(), message.to_string());
        }
    }

    if let Some(rating) = candidate.get("rating") {
        if !is_valid_rating(rating) {
            errors.insert("rating".to_string(), RATING_MESSAGE.to_string());
        }
    }

    // Type only; any string (including empty) is a usable image reference.
    if !matches!(
        candidate.get("imageUrl"),
        None | Some(JsonValue::Null) | Some(JsonValue::String(_))
    ) {
        errors.insert("imageUrl".to_string(), IMAGE_URL_MESSAGE.to_string());
    }

    errors
}

/// Runs [`validate`] but keeps only errors for fields the payload actually carries.
///
/// Used to reject a bad update payload before touching the store; the merged
/// document is validated in full afterwards.
pub fn validate_present(payload: &Map<String, JsonValue>) -> FieldErrors {
    validate(payload)
        .into_iter()
        .filter(|(field, _)| payload.contains_key(field))
        .collect()
}

fn is_non_blank_text(value: Option<&JsonValue>) -> bool {
    matches!(value, Some(JsonValue::String(s)) if !s.trim().is_empty())
}

fn is_positive_number(value: Option<&JsonValue>) -> bool {
    let n = match value {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    matches!(n, Some(n) if n.is_finite() && n > 0.0)
}

fn is_valid_rating(value: &JsonValue) -> bool {
    matches!(value.as_u64(), Some(r) if r <= MAX_RATING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: JsonValue) -> Map<String, JsonValue> {
        v.as_object().cloned().unwrap()
    }

    fn pancakes() -> Map<String, JsonValue> {
        obj(json!({
            "title": "Pancakes",
            "category": "Breakfast",
            "ingredients": "flour\nmilk\negg",
            "instructions": "Mix.\nCook.",
            "cookTime": 15,
            "servings": 2
        }))
    }

    #[test]
    fn accepts_a_complete_recipe() {
        assert!(validate(&pancakes()).is_empty());
    }

    #[test]
    fn reports_exactly_the_missing_fields() {
        let all = ["title", "category", "ingredients", "instructions", "cookTime", "servings"];
        for missing in all {
            let mut candidate = pancakes();
            candidate.remove(missing);
            let errors = validate(&candidate);
            assert_eq!(errors.keys().collect::<Vec<_>>(), vec![missing]);
        }

        let errors = validate(&Map::new());
        let mut expected: Vec<_> = all.to_vec();
        expected.sort();
        assert_eq!(errors.keys().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn blank_text_is_missing() {
        let mut candidate = pancakes();
        candidate.insert("title".into(), json!("   "));
        candidate.insert("category".into(), json!("\n\t"));
        candidate.insert("ingredients".into(), json!(42));
        let errors = validate(&candidate);
        assert_eq!(errors.get("title").map(String::as_str), Some("Title is required"));
        assert!(errors.contains_key("category"));
        assert!(errors.contains_key("ingredients"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn flags_non_positive_or_non_numeric_quantities() {
        for bad in [json!(0), json!(-3), json!("abc"), json!(null), json!(true), json!("")] {
            let mut candidate = pancakes();
            candidate.insert("cookTime".into(), bad.clone());
            candidate.insert("servings".into(), bad);
            let errors = validate(&candidate);
            assert_eq!(
                errors.get("cookTime").map(String::as_str),
                Some("Cook time must be a positive number")
            );
            assert_eq!(
                errors.get("servings").map(String::as_str),
                Some("Servings must be a positive number")
            );
        }
    }

    #[test]
    fn accepts_numeric_strings_and_fractions() {
        let mut candidate = pancakes();
        candidate.insert("cookTime".into(), json!("20"));
        candidate.insert("servings".into(), json!(1.5));
        assert!(validate(&candidate).is_empty());
    }

    #[test]
    fn rating_must_be_in_range_when_present() {
        let mut candidate = pancakes();
        for ok in [0, 1, 5] {
            candidate.insert("rating".into(), json!(ok));
            assert!(validate(&candidate).is_empty());
        }
        for bad in [json!(6), json!(-1), json!(2.5), json!("4")] {
            candidate.insert("rating".into(), bad);
            assert!(validate(&candidate).contains_key("rating"));
        }
    }

    #[test]
    fn image_url_must_be_text_or_null() {
        let mut candidate = pancakes();
        for ok in [json!("https://example.com/a.jpg"), json!(""), json!(null)] {
            candidate.insert("imageUrl".into(), ok);
            assert!(validate(&candidate).is_empty());
        }
        for bad in [json!(42), json!(true), json!(["a.jpg"]), json!({ "src": "a.jpg" })] {
            candidate.insert("imageUrl".into(), bad);
            let errors = validate(&candidate);
            assert_eq!(errors.get("imageUrl").map(String::as_str), Some("Image URL must be text"));
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn partial_payload_only_reports_carried_fields() {
        assert!(validate_present(&obj(json!({ "rating": 4 }))).is_empty());

        let errors = validate_present(&obj(json!({ "title": " ", "rating": 4 })));
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["title"]);
    }
}
