pub mod error;
pub mod recipe_repository;
