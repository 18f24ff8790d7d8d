//! Completion-service integration: client, prompts, and response parsing

pub mod analyzer;
pub mod client;
pub mod matcher;
pub mod parser;
pub mod prompts;
