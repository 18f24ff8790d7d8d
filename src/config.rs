//! Configuration management for the resume intake pipeline
//!
//! Non-secret settings live in a TOML file under the platform config
//! directory. Credentials are read from the environment only and are never
//! written to disk or embedded in source.

use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub completion: CompletionConfig,
    pub embedding: EmbeddingConfig,
    pub vector_store: VectorStoreConfig,
    pub intake: IntakeConfig,
}

/// Settings for the generative-text completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
}

/// Settings for the text-embedding service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub endpoint: String,
    pub model: String,
}

/// Settings for the remote vector table and its similarity-search procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    pub table: String,
    pub similarity_rpc: String,
    pub match_threshold: f32,
    pub default_match_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Guidance only, surfaced as a warning; uploads are never rejected on size.
    pub resume_size_guidance_mb: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completion: CompletionConfig {
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-1.0-pro".to_string(),
            },
            embedding: EmbeddingConfig {
                endpoint: "https://api.openai.com/v1/embeddings".to_string(),
                model: "text-embedding-ada-002".to_string(),
            },
            vector_store: VectorStoreConfig {
                table: "resume_vectors".to_string(),
                similarity_rpc: "match_resumes".to_string(),
                match_threshold: 0.5,
                default_match_count: 5,
            },
            intake: IntakeConfig {
                resume_size_guidance_mb: 10,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                IntakeError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            IntakeError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-intake")
            .join("config.toml")
    }
}

/// Service credentials, injected at process start from the environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub completion_api_key: Option<String>,
    pub embedding_api_key: Option<String>,
    pub vector_store_url: Option<String>,
    pub vector_store_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            completion_api_key: read_env("GEMINI_API_KEY"),
            embedding_api_key: read_env("OPENAI_API_KEY"),
            vector_store_url: read_env("SUPABASE_URL"),
            vector_store_key: read_env("SUPABASE_ANON_KEY"),
        }
    }

    pub fn completion_api_key(&self) -> Result<&str> {
        self.completion_api_key.as_deref().ok_or_else(|| {
            IntakeError::Configuration("GEMINI_API_KEY is not set".to_string())
        })
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
