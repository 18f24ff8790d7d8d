//! In-memory application form state

use crate::vector::store::ResumeMetadata;
use serde::{Deserialize, Serialize};

/// Insertion-ordered skill set with exact-match (case-sensitive) dedup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill; whitespace is trimmed, blanks and exact duplicates are
    /// ignored. Returns whether the set changed.
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }

    /// Union another skill list into this one, keeping existing entries and
    /// their order.
    pub fn union<'a>(&mut self, skills: impl IntoIterator<Item = &'a str>) {
        for skill in skills {
            self.insert(skill);
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn clear(&mut self) {
        self.skills.clear();
    }
}

/// User-entered fields plus the extracted resume text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationFormState {
    pub name: String,
    pub email: String,
    pub linkedin_url: String,
    pub skills: SkillSet,
    pub resume_text: String,
}

impl ApplicationFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for the vector store, available once name and email are set.
    pub fn metadata(&self) -> Option<ResumeMetadata> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return None;
        }
        Some(ResumeMetadata {
            name: self.name.clone(),
            email: self.email.clone(),
            skills: self.skills.as_slice().to_vec(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
