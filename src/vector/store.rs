//! Remote vector table for resume similarity search

use crate::config::VectorStoreConfig;
use crate::error::{IntakeError, Result};
use crate::vector::embeddings::Embedder;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Candidate metadata stored alongside a resume vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeMetadata {
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
}

/// One row of the remote `resume_vectors` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeVectorRecord {
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: ResumeMetadata,
}

/// Seam for the remote table: insert rows, run the similarity RPC.
pub trait VectorTable {
    fn insert(
        &self,
        record: ResumeVectorRecord,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn similarity_search(
        &self,
        query_embedding: Vec<f32>,
        match_threshold: f32,
        match_count: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ResumeVectorRecord>>> + Send;
}

/// Supabase REST client for the vector table and its similarity RPC.
pub struct SupabaseTable {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    table: String,
    similarity_rpc: String,
}

impl SupabaseTable {
    pub fn new(config: &VectorStoreConfig, base_url: String, anon_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            table: config.table.clone(),
            similarity_rpc: config.similarity_rpc.clone(),
        }
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

impl VectorTable for SupabaseTable {
    async fn insert(&self, record: ResumeVectorRecord) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.table);
        let response = self
            .authed(self.http.post(&url))
            .json(&[record])
            .send()
            .await
            .map_err(|e| IntakeError::Store(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntakeError::Store(format!(
                "Insert into {} rejected with {}: {}",
                self.table, status, body
            )));
        }
        Ok(())
    }

    async fn similarity_search(
        &self,
        query_embedding: Vec<f32>,
        match_threshold: f32,
        match_count: usize,
    ) -> Result<Vec<ResumeVectorRecord>> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, self.similarity_rpc);
        let body = json!({
            "query_embedding": query_embedding,
            "match_threshold": match_threshold,
            "match_count": match_count,
        });

        let response = self
            .authed(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| IntakeError::Store(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(IntakeError::Store(format!(
                "Similarity search {} failed with {}: {}",
                self.similarity_rpc, status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| IntakeError::Store(e.to_string()))
    }
}

/// Embedding store: embeds text and persists it with metadata.
///
/// Ranking and tie-breaking live entirely in the remote similarity procedure;
/// nothing is reordered locally.
pub struct EmbeddingStore<E: Embedder, T: VectorTable> {
    embedder: E,
    table: T,
    match_threshold: f32,
    default_match_count: usize,
}

impl<E: Embedder, T: VectorTable> EmbeddingStore<E, T> {
    pub fn new(embedder: E, table: T, config: &VectorStoreConfig) -> Self {
        Self {
            embedder,
            table,
            match_threshold: config.match_threshold,
            default_match_count: config.default_match_count,
        }
    }

    /// Embed `content` and insert one row. A failed embedding aborts before
    /// any write; a rejected insert needs no rollback since nothing else was
    /// mutated.
    pub async fn store(&self, content: &str, metadata: ResumeMetadata) -> Result<()> {
        let embedding = self.embedder.embed(content).await?;
        info!(
            "Storing resume vector for {} ({} dimensions)",
            metadata.email,
            embedding.len()
        );

        self.table
            .insert(ResumeVectorRecord {
                content: content.to_string(),
                embedding,
                metadata,
            })
            .await
    }

    /// Embed the query and return the remote store's ranked rows.
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ResumeVectorRecord>> {
        let query_embedding = self.embedder.embed(query).await?;
        self.table
            .similarity_search(
                query_embedding,
                self.match_threshold,
                limit.unwrap_or(self.default_match_count),
            )
            .await
    }
}
