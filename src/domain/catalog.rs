//! Read-only projections over the recipe list: filtering and derived categories.

use crate::domain::recipe::Recipe;
use rand::seq::SliceRandom;
use serde::Deserialize;

/// Category value that selects every recipe.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeFilter {
    /// Exact category to keep. `None`, empty, or `"all"` keeps every category.
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive substring matched against title and ingredients.
    #[serde(default)]
    pub search: String,
}

impl RecipeFilter {
    pub fn new(category: Option<&str>, search: &str) -> Self {
        Self {
            category: category.map(str::to_string),
            search: search.to_string(),
        }
    }

    fn selected_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(category) = self.selected_category() {
            if recipe.category != category {
                return false;
            }
        }
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        recipe.title.to_lowercase().contains(&term) || recipe.ingredients.to_lowercase().contains(&term)
    }
}

/// The filtered view, in source order.
pub fn filter<'a>(recipes: &'a [Recipe], filter: &RecipeFilter) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| filter.matches(r)).collect()
}

/// Distinct category values in first-seen order. Recomputed on every call.
pub fn categories(recipes: &[Recipe]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for recipe in recipes {
        if !seen.iter().any(|c| *c == recipe.category) {
            seen.push(recipe.category.clone());
        }
    }
    seen
}

pub fn pick_random(recipes: &[Recipe]) -> Option<&Recipe> {
    recipes.choose(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::RecipeId;
    use serde_json::json;

    fn recipe(title: &str, category: &str, ingredients: &str) -> Recipe {
        let doc = json!({
            "title": title,
            "category": category,
            "ingredients": ingredients,
            "instructions": "Cook.",
            "cookTime": 10,
            "servings": 1
        });
        Recipe::from_document(RecipeId::generate(), doc.as_object().cloned().unwrap()).unwrap()
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("Pancakes", "Breakfast", "flour\nmilk\negg"),
            recipe("Omelette", "Breakfast", "egg\nbutter"),
            recipe("Tomato Soup", "Dinner", "tomato\nonion"),
            recipe("Egg Fried Rice", "Dinner", "rice\nEGG"),
        ]
    }

    fn titles(view: Vec<&Recipe>) -> Vec<&str> {
        view.into_iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let recipes = sample();
        assert_eq!(filter(&recipes, &RecipeFilter::default()).len(), 4);
        assert_eq!(filter(&recipes, &RecipeFilter::new(Some("all"), "")).len(), 4);
    }

    #[test]
    fn filters_by_category() {
        let recipes = sample();
        let view = filter(&recipes, &RecipeFilter::new(Some("Dinner"), ""));
        assert_eq!(titles(view), vec!["Tomato Soup", "Egg Fried Rice"]);
        assert!(filter(&recipes, &RecipeFilter::new(Some("dinner"), "")).is_empty());
    }

    #[test]
    fn search_matches_title_or_ingredients_case_insensitively() {
        let recipes = sample();
        let view = filter(&recipes, &RecipeFilter::new(None, "Egg"));
        assert_eq!(titles(view), vec!["Pancakes", "Omelette", "Egg Fried Rice"]);

        let view = filter(&recipes, &RecipeFilter::new(Some("Dinner"), "egg"));
        assert_eq!(titles(view), vec!["Egg Fried Rice"]);
    }

    #[test]
    fn categories_are_derived_in_first_seen_order() {
        let mut recipes = sample();
        assert_eq!(categories(&recipes), vec!["Breakfast", "Dinner"]);
        recipes.retain(|r| r.category != "Dinner");
        assert_eq!(categories(&recipes), vec!["Breakfast"]);
    }

    #[test]
    fn random_pick() {
        assert!(pick_random(&[]).is_none());
        let recipes = sample();
        let picked = pick_random(&recipes).unwrap();
        assert!(recipes.iter().any(|r| r.id == picked.id));
    }
}
