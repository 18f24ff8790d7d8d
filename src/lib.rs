//! Resume intake library: PDF extraction, AI profile analysis, job matching,
//! and vector-embedding storage behind a form-lifecycle orchestrator.

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod input;
pub mod llm;
pub mod output;
pub mod vector;

pub use config::{Config, Credentials};
pub use error::{IntakeError, Result};
