//! Embedding generation and remote vector storage

pub mod embeddings;
pub mod store;
