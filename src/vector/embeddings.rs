//! Text embedding via an external embedding service

use crate::config::EmbeddingConfig;
use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};

/// Seam for the embedding endpoint: text in, fixed-length vector out.
pub trait Embedder {
    fn embed(&self, text: &str) -> impl std::future::Future<Output = Result<Vec<f32>>> + Send;
}

/// Client for an OpenAI-style `/v1/embeddings` endpoint.
pub struct OpenAiEmbedder {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbeddingConfig, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            IntakeError::Embedding("Missing embedding API key (OPENAI_API_KEY)".to_string())
        })?;

        let request = EmbeddingRequest {
            input: text,
            model: &self.model,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| IntakeError::Embedding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntakeError::Embedding(format!(
                "Embedding service returned {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| IntakeError::Embedding(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                IntakeError::Embedding("Embedding service returned no vectors".to_string())
            })
    }
}
