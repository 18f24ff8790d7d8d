//! Resume analysis via the completion service

use crate::error::{IntakeError, Result};
use crate::llm::client::CompletionService;
use crate::llm::parser::{
    parse_score, section, sections, split_bullets, split_list, strip_label, ParseOutcome,
};
use crate::llm::prompts::PromptTemplates;
use log::debug;
use serde::{Deserialize, Serialize};

/// Structured profile derived from resume text.
///
/// Always fully formed: fields the response did not populate carry their
/// empty defaults. Replaced wholesale by each new analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub score: u8,
    pub feedback: String,
}

pub struct ResumeAnalyzer<C: CompletionService> {
    client: C,
    templates: PromptTemplates,
}

impl<C: CompletionService> ResumeAnalyzer<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            templates: PromptTemplates::default(),
        }
    }

    /// Analyze resume text into a [`CandidateProfile`].
    ///
    /// The outer `Result` carries service-call failures; parsing itself never
    /// errors and reports shapeless responses as `Unparseable`.
    pub async fn analyze(&self, resume_text: &str) -> Result<ParseOutcome<CandidateProfile>> {
        let prompt = self.templates.render_resume_analysis(resume_text);
        let response = self
            .client
            .complete(&prompt)
            .await
            .map_err(|e| IntakeError::Analysis(e.to_string()))?;

        debug!("Completion response: {} chars", response.len());
        Ok(parse_profile(&response))
    }
}

/// Parse a six-section analysis response into a profile.
pub fn parse_profile(raw: &str) -> ParseOutcome<CandidateProfile> {
    if raw.trim().is_empty() {
        return ParseOutcome::Unparseable {
            raw: raw.to_string(),
            reason: "empty response".to_string(),
        };
    }

    let parts = sections(raw);
    ParseOutcome::Parsed(CandidateProfile {
        summary: strip_label(section(&parts, 0), "Summary:").to_string(),
        skills: split_list(strip_label(section(&parts, 1), "Skills:")),
        experience: split_bullets(strip_label(section(&parts, 2), "Experience:")),
        education: split_bullets(strip_label(section(&parts, 3), "Education:")),
        score: parse_score(strip_label(section(&parts, 4), "Score:")),
        feedback: strip_label(section(&parts, 5), "Feedback:").to_string(),
    })
}
