use crate::app::error::RepositoryError;
use crate::app::recipe_repository::RecipeRepository;
use crate::domain::validation::FieldErrors;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub repository: RecipeRepository,
}

/// Recipe fields accepted on create and update. Updates may send any subset.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub title: String,
    pub category: String,
    /// Newline-delimited ingredient lines.
    pub ingredients: String,
    /// Newline-delimited paragraphs.
    pub instructions: String,
    /// Minutes, strictly positive.
    pub cook_time: f64,
    pub servings: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    /// 0 (unrated) to 5.
    #[serde(default)]
    pub rating: Option<u8>,
}

/// A stored recipe as returned by the API.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDocument {
    /// 24 hex characters, assigned by the store.
    pub id: String,
    #[serde(flatten)]
    pub fields: RecipePayload,
    /// RFC 3339 creation time.
    pub created_at: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: String,
    pub recipe_id: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Field name to message, present on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            errors: None,
        }
    }
}

impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RepositoryError::InvalidIdentifier(_) | RepositoryError::InvalidPayload => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(self.to_string()))
            }
            RepositoryError::ValidationFailed(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation failed".to_string(),
                    errors: Some(errors),
                },
            ),
            RepositoryError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::new(self.to_string())),
            RepositoryError::StoreUnavailable(ref msg) => {
                error!(error = %msg, "document store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("Recipe store is unavailable, try again later"),
                )
            }
            RepositoryError::Store(ref e) => {
                error!(error = %e, "document store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Recipe store error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

pub fn json_422(err: JsonRejection, expected: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::new(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
        .into_response()
}
