//! Candidate scoring, ranking, and the surrounding matching workflow.
//!
//! The scoring engine is a pure, deterministic weighted sum over four
//! normalized factors; everything else here feeds it (catalog intake,
//! preference storage) or consumes it (ranking, allocation, the HTTP
//! router).

pub mod dataset;
pub mod domain;
pub(crate) mod intake;
pub mod ranking;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use dataset::{CandidateCatalog, CandidateCsvImporter, DatasetError};
pub use domain::{
    Candidate, CandidateId, Competitiveness, DonationLeverage, DonationStrategy, FundingSnapshot,
    ImpactFocus, PollingSnapshot, PreferenceId, UserPreferences, CANONICAL_ISSUES,
};
pub use intake::CandidateDataError;
pub use ranking::{
    rank_candidates, DonationAllocation, DonationPlan, RankedCandidate, RankedCandidateView,
    ScoreBand, DEFAULT_DONATION_AMOUNT, SPREAD_TARGET_COUNT,
};
pub use repository::{PreferenceRecord, PreferenceRepository, PreferenceView, RepositoryError};
pub use router::match_router;
pub use scoring::{
    ScoreBreakdown, ScoreComponent, ScoringConfig, ScoringEngine, WeightPolicy, WeightProfile,
};
pub use service::{MatchService, MatchServiceError};
