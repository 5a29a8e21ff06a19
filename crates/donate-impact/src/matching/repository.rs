use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, PreferenceId, UserPreferences};

/// Stored wizard state for one donor session: the answers plus how far the
/// donor got and what they picked on the results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub preference_id: PreferenceId,
    pub preferences: UserPreferences,
    pub current_step: u8,
    pub selected_candidates: Vec<CandidateId>,
}

impl PreferenceRecord {
    pub fn view(&self) -> PreferenceView {
        PreferenceView {
            preference_id: self.preference_id.clone(),
            issues: self.preferences.issues.clone(),
            impact: self.preferences.impact.map(|impact| impact.label()),
            strategy: self.preferences.strategy.map(|strategy| strategy.label()),
            current_step: self.current_step,
            selected_candidates: self.selected_candidates.clone(),
        }
    }
}

/// Storage abstraction so the matching service can be exercised in isolation.
pub trait PreferenceRepository: Send + Sync {
    fn insert(&self, record: PreferenceRecord) -> Result<PreferenceRecord, RepositoryError>;
    fn update(&self, record: PreferenceRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PreferenceId) -> Result<Option<PreferenceRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a donor's stored preferences.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceView {
    pub preference_id: PreferenceId,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<&'static str>,
    pub current_step: u8,
    pub selected_candidates: Vec<CandidateId>,
}
