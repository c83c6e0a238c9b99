pub mod catalog;
pub mod organizer;
pub mod rating;
pub mod recipe;
pub mod validation;
