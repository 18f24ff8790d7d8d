//! Generative-text completion service client

use crate::config::CompletionConfig;
use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};

/// Seam for the completion endpoint: one prompt in, free text out.
pub trait CompletionService {
    fn complete(&self, prompt: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Client for the Gemini `generateContent` REST endpoint.
///
/// Cheap to clone; the underlying HTTP client is reference-counted.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &CompletionConfig, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntakeError::Network(format!(
                "Completion service returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let candidate = parsed.candidates.into_iter().next().ok_or_else(|| {
            IntakeError::Network("Completion service returned no candidates".to_string())
        })?;

        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
