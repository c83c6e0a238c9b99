//! Repository contract against a real PostgreSQL document store.
//!
//! Runs only when `DATABASE_URL` is set (e.g. via `.env`); otherwise it returns early.

use recipe_catalog::{PostgresStore, RecipeRepository, RepositoryError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_repository_contract() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping postgres test");
        return Ok(());
    };

    let store = PostgresStore::connect(&database_url, 2, Duration::from_secs(5))?;
    store.clear().await?;
    let repo = RecipeRepository::new(Arc::new(store));

    let created = repo
        .create(json!({
            "title": "Pancakes",
            "category": "Breakfast",
            "ingredients": "flour\nmilk\negg",
            "instructions": "Mix.\nCook.",
            "cookTime": 15,
            "servings": 2,
            "imageUrl": "https://example.com/pancakes.jpg"
        }))
        .await?;
    let id = created.recipe_id.to_string();

    let before = repo.get(&id).await?;
    assert_eq!(before.rating, 0);
    assert_eq!(before.image_url.as_deref(), Some("https://example.com/pancakes.jpg"));

    let after = repo.update(&id, json!({ "rating": 4, "_id": "ignored" })).await?;
    assert_eq!(after.id, before.id);
    assert_eq!(after.rating, 4);
    assert_eq!(after.title, before.title);
    assert_eq!(after.cook_time, before.cook_time);

    let soup = repo
        .create(json!({
            "title": "Soup",
            "category": "Dinner",
            "ingredients": "water",
            "instructions": "Boil.",
            "cookTime": 30,
            "servings": 4
        }))
        .await?
        .recipe_id;
    let listed: Vec<_> = repo.list().await?.into_iter().map(|r| r.id).collect();
    assert_eq!(listed, vec![before.id, soup]);

    repo.delete(&soup.to_string()).await?;
    assert!(matches!(repo.delete(&soup.to_string()).await, Err(RepositoryError::NotFound)));
    assert_eq!(repo.categories().await?, vec!["Breakfast"]);

    Ok(())
}
