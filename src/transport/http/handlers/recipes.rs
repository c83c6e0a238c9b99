use crate::domain::catalog::{self, RecipeFilter};
use crate::transport::http::types::{
    json_422, AppState, CreatedResponse, ErrorResponse, MessageResponse, RecipeDocument,
    RecipePayload,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/api/recipes",
    params(
        ("category" = Option<String>, Query, description = "Exact category; omit or `all` for every category"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on title or ingredients")
    ),
    responses(
        (status = 200, description = "Recipes in store order", body = [RecipeDocument]),
        (status = 500, description = "Store error", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    Query(filter): Query<RecipeFilter>,
) -> Response {
    match state.repository.list().await {
        Ok(recipes) => {
            let view: Vec<_> = catalog::filter(&recipes, &filter);
            Json(view).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipePayload,
    responses(
        (status = 201, description = "Recipe created", body = CreatedResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> Response {
    let Json(payload) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "a recipe object"),
    };

    match state.repository.create(payload).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(CreatedResponse {
                message: created.message,
                recipe_id: created.recipe_id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id (24 hex characters)")),
    responses(
        (status = 200, description = "Recipe", body = RecipeDocument),
        (status = 400, description = "Invalid recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn get_recipe_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.repository.get(&id).await {
        Ok(recipe) => Json(recipe).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id (24 hex characters)")),
    request_body(content = RecipePayload, description = "Fields to overwrite; absent fields are kept"),
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDocument),
        (status = 400, description = "Invalid recipe ID or validation failed", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> Response {
    let Json(payload) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "a (partial) recipe object"),
    };

    match state.repository.update(&id, payload).await {
        Ok(recipe) => Json(recipe).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id (24 hex characters)")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponse),
        (status = 400, description = "Invalid recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn delete_recipe_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.repository.delete(&id).await {
        Ok(()) => Json(MessageResponse {
            message: "Recipe deleted successfully".to_string(),
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/random",
    responses(
        (status = 200, description = "A random recipe", body = RecipeDocument),
        (status = 404, description = "The catalog is empty", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn random_recipe_handler(State(state): State<AppState>) -> Response {
    match state.repository.random().await {
        Ok(Some(recipe)) => Json(recipe).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("No recipes yet")),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Distinct categories in first-seen order", body = [String]),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn list_categories_handler(State(state): State<AppState>) -> Response {
    match state.repository.categories().await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => e.into_response(),
    }
}
