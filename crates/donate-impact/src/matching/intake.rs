use std::collections::HashSet;

use super::domain::Candidate;

/// Validation errors raised while admitting candidates into a catalog.
///
/// Enum fields of [`Candidate`] already make unknown competitiveness values
/// and negative numerics unrepresentable; the guard covers what the type
/// system cannot.
#[derive(Debug, thiserror::Error)]
pub enum CandidateDataError {
    #[error("candidate at position {index} has an empty id")]
    EmptyId { index: usize },
    #[error("candidate '{id}' has an empty name")]
    EmptyName { id: String },
    #[error("duplicate candidate id '{0}'")]
    DuplicateId(String),
}

/// Guard admitting externally supplied candidate records into a catalog.
#[derive(Debug, Clone, Default)]
pub struct CandidateGuard;

impl CandidateGuard {
    /// Validate a batch, preserving input order.
    pub fn admit(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, CandidateDataError> {
        let mut seen = HashSet::new();
        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.id.0.trim().is_empty() {
                return Err(CandidateDataError::EmptyId { index });
            }
            if candidate.name.trim().is_empty() {
                return Err(CandidateDataError::EmptyName {
                    id: candidate.id.0.clone(),
                });
            }
            if !seen.insert(candidate.id.0.clone()) {
                return Err(CandidateDataError::DuplicateId(candidate.id.0.clone()));
            }
        }

        Ok(candidates)
    }
}
