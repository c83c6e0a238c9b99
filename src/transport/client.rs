//! Typed HTTP client for the recipe API.
//!
//! Lets the organizer (or any other caller) drive a remote catalog through the
//! same `RecipeWriter` seam the in-process repository implements.

use crate::domain::organizer::RecipeWriter;
use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::validation::FieldErrors;
use crate::storage::Document;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        errors: Option<FieldErrors>,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedBody {
    recipe_id: RecipeId,
}

#[derive(Clone)]
pub struct RecipeClient {
    base_url: String,
    http: reqwest::Client,
}

impl RecipeClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        let body = resp.json::<ErrorBody>().await.unwrap_or(ErrorBody {
            error: status.canonical_reason().unwrap_or("error").to_string(),
            errors: None,
        });
        Err(ClientError::Api {
            status,
            message: body.error,
            errors: body.errors,
        })
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, ClientError> {
        Self::decode(self.http.get(self.url("/api/recipes")).send().await?).await
    }

    pub async fn get(&self, id: &str) -> Result<Recipe, ClientError> {
        Self::decode(self.http.get(self.url(&format!("/api/recipes/{}", id))).send().await?).await
    }

    /// Returns the identifier assigned by the store.
    pub async fn create(&self, payload: &JsonValue) -> Result<RecipeId, ClientError> {
        let resp = self.http.post(self.url("/api/recipes")).json(payload).send().await?;
        let created: CreatedBody = Self::decode(resp).await?;
        Ok(created.recipe_id)
    }

    pub async fn update(&self, id: &str, payload: &JsonValue) -> Result<Recipe, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/api/recipes/{}", id)))
            .json(payload)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/recipes/{}", id)))
            .send()
            .await?;
        let _: JsonValue = Self::decode(resp).await?;
        Ok(())
    }

    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        Self::decode(self.http.get(self.url("/api/categories")).send().await?).await
    }
}

#[async_trait]
impl RecipeWriter for RecipeClient {
    async fn update_recipe(&self, id: RecipeId, patch: Document) -> anyhow::Result<Recipe> {
        Ok(self.update(&id.to_hex(), &JsonValue::Object(patch)).await?)
    }
}
