//! CLI interface for the resume intake pipeline

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-intake")]
#[command(about = "Job-application intake: resume analysis, job matching, and vector search")]
#[command(
    long_about = "Extract text from PDF resumes, analyze candidate profiles and job fit with a \
                  generative-text service, and store resume embeddings for similarity search"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume into a candidate profile
    Analyze {
        /// Path to the resume PDF
        #[arg(short, long)]
        resume: PathBuf,

        /// Also store the resume embedding (requires --name and --email)
        #[arg(long)]
        store: bool,

        /// Candidate name, used as vector-store metadata
        #[arg(long)]
        name: Option<String>,

        /// Candidate email, used as vector-store metadata
        #[arg(long)]
        email: Option<String>,
    },

    /// Match a resume against a job description
    Match {
        /// Path to the resume PDF
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to the job description text file
        #[arg(short, long)]
        job: PathBuf,
    },

    /// Search stored resumes by similarity
    Search {
        /// Query text
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run the full intake flow and submit the application
    Submit {
        /// Path to the resume PDF
        #[arg(short, long)]
        resume: PathBuf,

        /// Candidate name
        #[arg(long)]
        name: String,

        /// Candidate email
        #[arg(long)]
        email: String,

        /// LinkedIn profile URL
        #[arg(long)]
        linkedin: String,

        /// Skills to add to the application
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,

        /// Optional job description file to match against before submitting
        #[arg(short, long)]
        job: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
