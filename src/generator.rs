//! Client for the external service that builds and stores a user's weekly plan.

use anyhow::Context;
use axum::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeneratorError {
    #[error("Meal plan generator API URL is not configured.")]
    NotConfigured,

    /// Non-2xx answer; carries the message shown to the user.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Transport(String),
}

/// Starts generation of the weekly plan; the generator writes the result to the store.
#[async_trait]
pub trait MealPlanGenerator: Send + Sync {
    async fn generate(&self, user_id: Uuid) -> Result<(), GeneratorError>;
}

#[derive(Serialize)]
struct GenerateRequest {
    user_id: Uuid,
}

pub struct HttpMealPlanGenerator {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl HttpMealPlanGenerator {
    pub fn new(base_url: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("projectfit/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build generator http client")?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self) -> Result<String, GeneratorError> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}/generate-meal-plan", base.trim_end_matches('/')))
            .ok_or(GeneratorError::NotConfigured)
    }
}

#[async_trait]
impl MealPlanGenerator for HttpMealPlanGenerator {
    async fn generate(&self, user_id: Uuid) -> Result<(), GeneratorError> {
        let url = self.endpoint()?;

        let res = self
            .client
            .post(&url)
            .json(&GenerateRequest { user_id })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, %url, "generator unreachable");
                GeneratorError::Transport(e.to_string())
            })?;

        let status = res.status();
        if status.is_success() {
            info!(user_id = %user_id, %status, "meal plan generated");
            return Ok(());
        }

        let body = res.bytes().await.unwrap_or_default();
        let message = failure_message(status.as_u16(), &body);
        warn!(user_id = %user_id, %status, %message, "generator rejected request");
        Err(GeneratorError::Rejected(message))
    }
}

/// The `detail` of a JSON error body, else a generic status message.
pub fn failure_message(status: u16, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());

    match detail {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s,
        Some(serde_json::Value::Null) | Some(serde_json::Value::String(_)) | None => {
            format!("API request failed with status {status}")
        }
        Some(other) => other.to_string(),
    }
}
