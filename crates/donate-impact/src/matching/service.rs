use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::dataset::CandidateCatalog;
use super::domain::{CandidateId, DonationStrategy, PreferenceId, UserPreferences};
use super::ranking::{rank_candidates, DonationPlan, RankedCandidate};
use super::repository::{PreferenceRecord, PreferenceRepository, RepositoryError};
use super::scoring::{ScoreBreakdown, ScoringConfig, ScoringEngine};

/// Service composing the candidate catalog, scoring engine, and preference
/// store behind one API surface.
pub struct MatchService<R> {
    catalog: Arc<CandidateCatalog>,
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

static PREFERENCE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_preference_id() -> PreferenceId {
    let id = PREFERENCE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PreferenceId(format!("donor-{id:06}"))
}

impl<R> MatchService<R>
where
    R: PreferenceRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<CandidateCatalog>, config: ScoringConfig) -> Self {
        Self {
            catalog,
            repository,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    pub fn catalog(&self) -> &CandidateCatalog {
        &self.catalog
    }

    /// Persist a wizard pass and hand back the stored record.
    pub fn save_preferences(
        &self,
        preferences: UserPreferences,
        current_step: u8,
    ) -> Result<PreferenceRecord, MatchServiceError> {
        let record = PreferenceRecord {
            preference_id: next_preference_id(),
            preferences,
            current_step,
            selected_candidates: Vec::new(),
        };

        Ok(self.repository.insert(record)?)
    }

    pub fn preferences(&self, id: &PreferenceId) -> Result<PreferenceRecord, MatchServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Record which candidates the donor picked on the results page.
    pub fn select_candidates(
        &self,
        id: &PreferenceId,
        selected: Vec<CandidateId>,
    ) -> Result<PreferenceRecord, MatchServiceError> {
        for candidate_id in &selected {
            if !self.catalog.contains(candidate_id) {
                return Err(MatchServiceError::UnknownCandidate(candidate_id.clone()));
            }
        }

        let mut record = self.preferences(id)?;
        record.selected_candidates = selected;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Rank the whole catalog for the given preferences, best match first.
    pub fn rank(&self, preferences: &UserPreferences) -> Vec<RankedCandidate> {
        rank_candidates(&self.engine, self.catalog.candidates(), preferences)
    }

    pub fn rank_stored(
        &self,
        id: &PreferenceId,
    ) -> Result<Vec<RankedCandidate>, MatchServiceError> {
        let record = self.preferences(id)?;
        Ok(self.rank(&record.preferences))
    }

    /// Scoring trail for one catalog candidate under the given preferences.
    pub fn explain(
        &self,
        candidate_id: &CandidateId,
        preferences: &UserPreferences,
    ) -> Result<ScoreBreakdown, MatchServiceError> {
        let candidate = self
            .catalog
            .get(candidate_id)
            .ok_or_else(|| MatchServiceError::UnknownCandidate(candidate_id.clone()))?;
        Ok(self.engine.explain(candidate, preferences))
    }

    /// Build the donation split for a stored preference record.
    ///
    /// Single-strategy donors get their explicit selection when present and
    /// the top-ranked candidate otherwise; a missing strategy answer counts
    /// as single.
    pub fn donation_plan(
        &self,
        id: &PreferenceId,
        total_amount: u32,
    ) -> Result<DonationPlan, MatchServiceError> {
        let record = self.preferences(id)?;
        let strategy = record
            .preferences
            .strategy
            .unwrap_or(DonationStrategy::Single);

        let plan = match (strategy, record.selected_candidates.first()) {
            (DonationStrategy::Single, Some(candidate_id)) => {
                DonationPlan::single(candidate_id.clone(), total_amount)
            }
            _ => {
                let ranked = self.rank(&record.preferences);
                DonationPlan::build(&ranked, strategy, total_amount)
            }
        };

        Ok(plan)
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("unknown candidate '{0}'")]
    UnknownCandidate(CandidateId),
}
