//! Intake form orchestrator
//!
//! Sequences the form lifecycle: field edits, resume upload
//! (extract → analyze → optional vector store), job matching, and submission.
//! A single operation may be in flight at a time; a second trigger is
//! rejected with [`IntakeError::OperationInFlight`] instead of overlapping.
//! Every failure path leaves the previously valid state intact.

use crate::error::{IntakeError, Result};
use crate::form::state::ApplicationFormState;
use crate::input::text_extractor::extract_from_bytes;
use crate::llm::analyzer::{CandidateProfile, ResumeAnalyzer};
use crate::llm::client::CompletionService;
use crate::llm::matcher::{JobMatchResult, JobMatcher};
use crate::llm::parser::ParseOutcome;
use crate::vector::embeddings::Embedder;
use crate::vector::store::{EmbeddingStore, VectorTable};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Extracting,
    Analyzing,
    Matching,
    Submitting,
}

/// Completed application handed to the submission sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedApplication {
    pub name: String,
    pub email: String,
    pub linkedin_url: String,
    pub skills: Vec<String>,
    pub resume_text: String,
    pub profile: Option<CandidateProfile>,
    pub job_match: Option<JobMatchResult>,
}

/// External collaborator that receives a completed application.
pub trait SubmissionSink {
    fn submit(
        &self,
        application: &SubmittedApplication,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Default sink: logs the application and reports success. Stands in until a
/// real submission endpoint exists.
pub struct LoggingSink;

impl SubmissionSink for LoggingSink {
    async fn submit(&self, application: &SubmittedApplication) -> Result<()> {
        info!(
            "Application submitted: {}",
            serde_json::to_string(application)?
        );
        Ok(())
    }
}

/// What a resume upload accomplished beyond extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReport {
    /// A parsed profile was installed.
    pub analyzed: bool,
    /// The resume vector was written to the remote store.
    pub stored: bool,
}

pub struct FormSession<C, E, T, S>
where
    C: CompletionService,
    E: Embedder,
    T: VectorTable,
    S: SubmissionSink,
{
    state: ApplicationFormState,
    profile: Option<CandidateProfile>,
    job_match: Option<JobMatchResult>,
    phase: FormPhase,
    analyzer: ResumeAnalyzer<C>,
    matcher: JobMatcher<C>,
    store: Option<EmbeddingStore<E, T>>,
    sink: S,
}

impl<C, E, T, S> FormSession<C, E, T, S>
where
    C: CompletionService + Clone,
    E: Embedder,
    T: VectorTable,
    S: SubmissionSink,
{
    pub fn new(client: C, store: Option<EmbeddingStore<E, T>>, sink: S) -> Self {
        Self {
            state: ApplicationFormState::new(),
            profile: None,
            job_match: None,
            phase: FormPhase::Idle,
            analyzer: ResumeAnalyzer::new(client.clone()),
            matcher: JobMatcher::new(client),
            store,
            sink,
        }
    }

    // Field edits are synchronous and allowed in any phase.

    pub fn set_name(&mut self, name: &str) {
        self.state.name = name.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.state.email = email.to_string();
    }

    pub fn set_linkedin_url(&mut self, url: &str) {
        self.state.linkedin_url = url.to_string();
    }

    pub fn add_skill(&mut self, skill: &str) -> bool {
        self.state.skills.insert(skill)
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.state.skills.remove(skill);
    }

    pub fn state(&self) -> &ApplicationFormState {
        &self.state
    }

    pub fn profile(&self) -> Option<&CandidateProfile> {
        self.profile.as_ref()
    }

    pub fn job_match(&self) -> Option<&JobMatchResult> {
        self.job_match.as_ref()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Upload a resume as a binary PDF payload: extract text, then analyze.
    ///
    /// An extraction failure aborts with no state change. Once extraction
    /// succeeds, `resume_text` is installed and survives any later failure.
    pub async fn upload_resume(&mut self, payload: &[u8]) -> Result<UploadReport> {
        self.begin(FormPhase::Extracting)?;

        let text = match extract_from_bytes(payload) {
            Ok(text) => text,
            Err(e) => {
                self.phase = FormPhase::Idle;
                return Err(e);
            }
        };

        self.analyze_extracted(text).await
    }

    /// Analyze resume text that was extracted elsewhere.
    pub async fn analyze_resume_text(&mut self, text: String) -> Result<UploadReport> {
        self.begin(FormPhase::Analyzing)?;
        self.analyze_extracted(text).await
    }

    async fn analyze_extracted(&mut self, text: String) -> Result<UploadReport> {
        self.phase = FormPhase::Analyzing;
        self.state.resume_text = text;

        let outcome = match self.analyzer.analyze(&self.state.resume_text).await {
            Ok(outcome) => outcome,
            Err(e) => {
                // Extracted text is kept; only the profile is missing.
                self.phase = FormPhase::Idle;
                return Err(e);
            }
        };

        let report = match outcome {
            ParseOutcome::Unparseable { raw, reason } => {
                warn!(
                    "Analysis response unparseable ({}); raw text: {:?}",
                    reason, raw
                );
                UploadReport {
                    analyzed: false,
                    stored: false,
                }
            }
            ParseOutcome::Parsed(profile) => {
                self.state
                    .skills
                    .union(profile.skills.iter().map(String::as_str));
                self.profile = Some(profile);
                let stored = self.store_resume_vector().await;
                UploadReport {
                    analyzed: true,
                    stored,
                }
            }
        };

        self.phase = FormPhase::Idle;
        Ok(report)
    }

    /// Best-effort vector write; failure never fails the upload flow.
    async fn store_resume_vector(&self) -> bool {
        let (Some(store), Some(metadata)) = (&self.store, self.state.metadata()) else {
            return false;
        };

        match store.store(&self.state.resume_text, metadata).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to store resume vector: {}", e);
                false
            }
        }
    }

    /// Match the extracted resume against a job description.
    ///
    /// Returns whether a new match result was installed; an unparseable
    /// response keeps the previous result.
    pub async fn match_job(&mut self, job_description: &str) -> Result<bool> {
        if job_description.trim().is_empty() {
            return Err(IntakeError::InvalidInput(
                "Job description must not be empty".to_string(),
            ));
        }
        if self.state.resume_text.is_empty() {
            return Err(IntakeError::InvalidInput(
                "Upload a resume before matching".to_string(),
            ));
        }

        self.begin(FormPhase::Matching)?;

        let result = self
            .matcher
            .match_job(&self.state.resume_text, job_description)
            .await;
        self.phase = FormPhase::Idle;

        match result? {
            ParseOutcome::Parsed(job_match) => {
                self.job_match = Some(job_match);
                Ok(true)
            }
            ParseOutcome::Unparseable { raw, reason } => {
                warn!(
                    "Match response unparseable ({}); raw text: {:?}",
                    reason, raw
                );
                Ok(false)
            }
        }
    }

    /// Submit the application through the sink, then reset the form.
    ///
    /// A sink failure keeps every field and result as-is.
    pub async fn submit(&mut self) -> Result<()> {
        for (field, value) in [
            ("name", &self.state.name),
            ("email", &self.state.email),
            ("LinkedIn URL", &self.state.linkedin_url),
        ] {
            if value.trim().is_empty() {
                return Err(IntakeError::InvalidInput(format!(
                    "Missing required field: {}",
                    field
                )));
            }
        }

        self.begin(FormPhase::Submitting)?;

        let application = SubmittedApplication {
            name: self.state.name.clone(),
            email: self.state.email.clone(),
            linkedin_url: self.state.linkedin_url.clone(),
            skills: self.state.skills.as_slice().to_vec(),
            resume_text: self.state.resume_text.clone(),
            profile: self.profile.clone(),
            job_match: self.job_match.clone(),
        };

        let result = self.sink.submit(&application).await;
        self.phase = FormPhase::Idle;
        result?;

        self.state.reset();
        self.profile = None;
        self.job_match = None;
        Ok(())
    }

    fn begin(&mut self, phase: FormPhase) -> Result<()> {
        if self.phase != FormPhase::Idle {
            return Err(IntakeError::OperationInFlight(format!(
                "{:?} is still running",
                self.phase
            )));
        }
        self.phase = phase;
        Ok(())
    }

    #[cfg(test)]
    fn force_phase(&mut self, phase: FormPhase) {
        self.phase = phase;
    }
}
