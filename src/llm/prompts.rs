//! Prompt templates for resume analysis and job matching

/// Prompt templates sent to the completion service.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub resume_analysis: String,
    pub job_match: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            resume_analysis: RESUME_ANALYSIS_TEMPLATE.to_string(),
            job_match: JOB_MATCH_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_resume_analysis(&self, resume_text: &str) -> String {
        self.resume_analysis.replace("{resume}", resume_text)
    }

    pub fn render_job_match(&self, resume_text: &str, job_description: &str) -> String {
        self.job_match
            .replace("{resume}", resume_text)
            .replace("{job}", job_description)
    }
}

const RESUME_ANALYSIS_TEMPLATE: &str = r#"Analyze this resume text and provide a structured response with:
1. A brief professional summary
2. Key skills (as a list)
3. Notable experience highlights (as a list)
4. Education details (as a list)
5. A score from 0-100 based on overall profile strength
6. Brief feedback on areas of improvement

Resume text:
{resume}"#;

const JOB_MATCH_TEMPLATE: &str = r#"Compare this resume with the job description and provide:
1. A match score (0-100)
2. Specific feedback on fit
3. List of missing skills or qualifications

Resume:
{resume}

Job Description:
{job}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_analysis_rendering() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_resume_analysis("Software Engineer at Tech Corp.");

        assert!(prompt.contains("Software Engineer at Tech Corp."));
        assert!(prompt.contains("score from 0-100"));
        assert!(!prompt.contains("{resume}"));
    }

    #[test]
    fn test_job_match_rendering() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_job_match("Python developer", "Senior role requiring React");

        assert!(prompt.contains("Python developer"));
        assert!(prompt.contains("Senior role requiring React"));
        assert!(prompt.contains("match score (0-100)"));
        assert!(!prompt.contains("{job}"));
    }
}
