//! Resume-to-job-description matching via the completion service

use crate::error::{IntakeError, Result};
use crate::llm::client::CompletionService;
use crate::llm::parser::{parse_score, section, sections, split_list, strip_label, ParseOutcome};
use crate::llm::prompts::PromptTemplates;
use log::debug;
use serde::{Deserialize, Serialize};

/// Structured comparison of a resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchResult {
    pub match_score: u8,
    pub feedback: String,
    pub missing_skills: Vec<String>,
}

pub struct JobMatcher<C: CompletionService> {
    client: C,
    templates: PromptTemplates,
}

impl<C: CompletionService> JobMatcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            templates: PromptTemplates::default(),
        }
    }

    /// Compare resume text against a job description.
    ///
    /// Callers must reject empty descriptions before calling; this method
    /// enforces that contract with an `InvalidInput` error.
    pub async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ParseOutcome<JobMatchResult>> {
        if job_description.trim().is_empty() {
            return Err(IntakeError::InvalidInput(
                "Job description must not be empty".to_string(),
            ));
        }

        let prompt = self.templates.render_job_match(resume_text, job_description);
        let response = self
            .client
            .complete(&prompt)
            .await
            .map_err(|e| IntakeError::Match(e.to_string()))?;

        debug!("Match response: {} chars", response.len());
        Ok(parse_match(&response))
    }
}

/// Parse a three-section match response.
pub fn parse_match(raw: &str) -> ParseOutcome<JobMatchResult> {
    if raw.trim().is_empty() {
        return ParseOutcome::Unparseable {
            raw: raw.to_string(),
            reason: "empty response".to_string(),
        };
    }

    let parts = sections(raw);
    ParseOutcome::Parsed(JobMatchResult {
        match_score: parse_score(strip_label(section(&parts, 0), "Match Score:")),
        feedback: strip_label(section(&parts, 1), "Feedback:").to_string(),
        missing_skills: split_list(strip_label(section(&parts, 2), "Missing Skills:")),
    })
}
