//! Resume intake: job-application analysis and matching CLI

mod cli;
mod config;
mod error;
mod form;
mod input;
mod llm;
mod output;
mod vector;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::{Config, Credentials};
use error::{IntakeError, Result};
use form::session::{FormSession, LoggingSink};
use input::manager::UploadManager;
use llm::client::GeminiClient;
use llm::matcher::JobMatcher;
use llm::parser::ParseOutcome;
use log::{error, info, warn};
use std::path::Path;
use std::process;
use vector::embeddings::OpenAiEmbedder;
use vector::store::{EmbeddingStore, SupabaseTable};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let credentials = Credentials::from_env();

    if let Err(e) = run_command(cli.command, config, credentials).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, credentials: Credentials) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            store,
            name,
            email,
        } => {
            cli::validate_file_extension(&resume, &["pdf"])
                .map_err(|e| IntakeError::InvalidInput(format!("Resume file: {}", e)))?;

            let client = completion_client(&config, &credentials)?;
            let vector_store = if store {
                let built = vector_store(&config, &credentials);
                if built.is_none() {
                    warn!("Vector store not configured; skipping embedding storage");
                }
                built
            } else {
                None
            };

            let mut session = FormSession::new(client, vector_store, LoggingSink);
            if let Some(name) = name {
                session.set_name(&name);
            }
            if let Some(email) = email {
                session.set_email(&email);
            }

            info!("Extracting text from {}", resume.display());
            let text = UploadManager::new().extract_text(&resume).await?;
            info!("Extracted {} characters", text.len());

            let report = session.analyze_resume_text(text).await?;
            match session.profile() {
                Some(profile) => output::formatter::print_profile(profile),
                None => println!("The analysis response could not be parsed; no profile produced."),
            }
            if report.stored {
                println!("\nResume embedding stored.");
            }
            Ok(())
        }

        Commands::Match { resume, job } => {
            cli::validate_file_extension(&resume, &["pdf"])
                .map_err(|e| IntakeError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| IntakeError::InvalidInput(format!("Job description file: {}", e)))?;

            let resume_text = UploadManager::new().extract_text(&resume).await?;
            let job_description = read_job_description(&job)?;

            let matcher = JobMatcher::new(completion_client(&config, &credentials)?);
            match matcher.match_job(&resume_text, &job_description).await? {
                ParseOutcome::Parsed(result) => output::formatter::print_match(&result),
                ParseOutcome::Unparseable { reason, .. } => {
                    println!("The match response could not be parsed ({}).", reason);
                }
            }
            Ok(())
        }

        Commands::Search { query, limit } => {
            let store = vector_store(&config, &credentials).ok_or_else(|| {
                IntakeError::Configuration(
                    "Vector store not configured; set SUPABASE_URL and SUPABASE_ANON_KEY"
                        .to_string(),
                )
            })?;

            let records = store.search(&query, limit).await?;
            output::formatter::print_search_results(&records);
            Ok(())
        }

        Commands::Submit {
            resume,
            name,
            email,
            linkedin,
            skills,
            job,
        } => {
            cli::validate_file_extension(&resume, &["pdf"])
                .map_err(|e| IntakeError::InvalidInput(format!("Resume file: {}", e)))?;

            let client = completion_client(&config, &credentials)?;
            let mut session = FormSession::new(client, vector_store(&config, &credentials), LoggingSink);
            session.set_name(&name);
            session.set_email(&email);
            session.set_linkedin_url(&linkedin);
            for skill in &skills {
                session.add_skill(skill);
            }

            info!("Uploading resume {}", resume.display());
            let payload = tokio::fs::read(&resume).await?;
            let report = session.upload_resume(&payload).await?;
            if let Some(profile) = session.profile() {
                output::formatter::print_profile(profile);
            }
            if report.stored {
                println!("\nResume embedding stored.");
            }

            if let Some(job) = job {
                cli::validate_file_extension(&job, &["txt", "md"])
                    .map_err(|e| IntakeError::InvalidInput(format!("Job description file: {}", e)))?;
                let job_description = read_job_description(&job)?;
                if session.match_job(&job_description).await? {
                    if let Some(result) = session.job_match() {
                        output::formatter::print_match(result);
                    }
                }
            }

            session.submit().await?;
            println!("\nApplication submitted.");
            Ok(())
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        IntakeError::Configuration(format!("Failed to render config: {}", e))
                    })?;
                    println!("# {}\n{}", Config::config_path().display(), content);
                }
                ConfigAction::Reset => {
                    Config::default().save()?;
                    println!("Configuration reset to defaults.");
                }
            }
            Ok(())
        }
    }
}

fn completion_client(config: &Config, credentials: &Credentials) -> Result<GeminiClient> {
    let api_key = credentials.completion_api_key()?;
    Ok(GeminiClient::new(&config.completion, api_key.to_string()))
}

fn vector_store(
    config: &Config,
    credentials: &Credentials,
) -> Option<EmbeddingStore<OpenAiEmbedder, SupabaseTable>> {
    let url = credentials.vector_store_url.clone()?;
    let key = credentials.vector_store_key.clone()?;

    let embedder = OpenAiEmbedder::new(&config.embedding, credentials.embedding_api_key.clone());
    let table = SupabaseTable::new(&config.vector_store, url, key);
    Some(EmbeddingStore::new(embedder, table, &config.vector_store))
}

fn read_job_description(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Err(IntakeError::InvalidInput(format!(
            "Job description file is empty: {}",
            path.display()
        )));
    }
    Ok(text)
}
