use crate::transport::http::handlers::{health, recipes};
use crate::transport::http::middleware::log_request;
use crate::transport::http::types::{
    CreatedResponse, ErrorResponse, MessageResponse, RecipeDocument, RecipePayload,
};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        recipes::list_recipes_handler,
        recipes::create_recipe_handler,
        recipes::get_recipe_handler,
        recipes::update_recipe_handler,
        recipes::delete_recipe_handler,
        recipes::random_recipe_handler,
        recipes::list_categories_handler
    ),
    components(schemas(
        RecipePayload,
        RecipeDocument,
        CreatedResponse,
        MessageResponse,
        ErrorResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/recipes",
            get(recipes::list_recipes_handler).post(recipes::create_recipe_handler),
        )
        .route("/api/recipes/random", get(recipes::random_recipe_handler))
        .route(
            "/api/recipes/:id",
            get(recipes::get_recipe_handler)
                .put(recipes::update_recipe_handler)
                .delete(recipes::delete_recipe_handler),
        )
        .route("/api/categories", get(recipes::list_categories_handler))
        .layer(axum::middleware::from_fn(log_request))
        .with_state(app_state)
}
