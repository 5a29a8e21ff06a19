use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matching::dataset::CandidateCatalog;
use crate::matching::domain::{
    Candidate, CandidateId, Competitiveness, DonationLeverage, DonationStrategy, FundingSnapshot,
    ImpactFocus, PollingSnapshot, PreferenceId, UserPreferences,
};
use crate::matching::repository::{PreferenceRecord, PreferenceRepository, RepositoryError};
use crate::matching::router::match_router;
use crate::matching::scoring::ScoringConfig;
use crate::matching::service::MatchService;

pub(super) fn candidate(
    id: &str,
    name: &str,
    competitiveness: Competitiveness,
    funding: FundingSnapshot,
    time_to_election_days: u32,
    issues: &[&str],
) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: name.to_string(),
        district: "ZZ-01".to_string(),
        polling: PollingSnapshot {
            us: 46.0,
            them: 48.0,
            moe: 3.0,
        },
        funding,
        issues: issues.iter().map(|issue| issue.to_string()).collect(),
        donation_leverage: DonationLeverage::Medium,
        time_to_election_days,
        competitiveness,
        site: "https://example.org".to_string(),
        profile: String::new(),
    }
}

/// Three candidates with well-separated scores under [`donor_preferences`]:
/// the tossup underdog ranks first, the safe seat second, the lean race last.
pub(super) fn sample_candidates() -> Vec<Candidate> {
    vec![
        candidate(
            "a-frey",
            "Alice Frey",
            Competitiveness::Tossup,
            FundingSnapshot {
                us: 200_000,
                them: 1_000_000,
            },
            30,
            &["climate", "healthcare"],
        ),
        candidate(
            "b-ortiz",
            "Ben Ortiz",
            Competitiveness::Lean,
            FundingSnapshot {
                us: 400_000,
                them: 400_000,
            },
            182,
            &["economy"],
        ),
        candidate(
            "c-singh",
            "Chandra Singh",
            Competitiveness::Safe,
            FundingSnapshot {
                us: 100_000,
                them: 300_000,
            },
            365,
            &["climate"],
        ),
    ]
}

pub(super) fn catalog() -> CandidateCatalog {
    CandidateCatalog::new(sample_candidates()).expect("sample candidates admit")
}

pub(super) fn donor_preferences() -> UserPreferences {
    UserPreferences {
        issues: vec!["climate".to_string(), "healthcare".to_string()],
        impact: None,
        strategy: Some(DonationStrategy::Spread),
    }
}

pub(super) fn single_strategy_preferences() -> UserPreferences {
    UserPreferences {
        issues: vec!["climate".to_string()],
        impact: Some(ImpactFocus::Close),
        strategy: Some(DonationStrategy::Single),
    }
}

pub(super) fn build_service() -> (MatchService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = MatchService::new(
        repository.clone(),
        Arc::new(catalog()),
        ScoringConfig::default(),
    );
    (service, repository)
}

pub(super) fn match_router_with_service(
    service: MatchService<MemoryRepository>,
) -> axum::Router {
    match_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<PreferenceId, PreferenceRecord>>>,
}

impl PreferenceRepository for MemoryRepository {
    fn insert(&self, record: PreferenceRecord) -> Result<PreferenceRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.preference_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.preference_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: PreferenceRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.preference_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &PreferenceId) -> Result<Option<PreferenceRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl PreferenceRepository for UnavailableRepository {
    fn insert(&self, _record: PreferenceRecord) -> Result<PreferenceRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: PreferenceRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &PreferenceId) -> Result<Option<PreferenceRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 16)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
