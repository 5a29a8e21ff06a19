use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use donate_impact::config::AppConfig;
use donate_impact::error::AppError;
use donate_impact::matching::{
    Candidate, CandidateCatalog, CandidateId, Competitiveness, DonationLeverage, FundingSnapshot,
    PollingSnapshot, PreferenceId, PreferenceRecord, PreferenceRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPreferenceRepository {
    records: Arc<Mutex<HashMap<PreferenceId, PreferenceRecord>>>,
}

impl PreferenceRepository for InMemoryPreferenceRepository {
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
        if guard.contains_key(&record.preference_id) {
            guard.insert(record.preference_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &PreferenceId) -> Result<Option<PreferenceRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Resolve the candidate catalog: an explicit path wins, then the configured
/// dataset, then the embedded sample.
pub(crate) fn load_catalog(
    override_path: Option<PathBuf>,
    config: &AppConfig,
) -> Result<CandidateCatalog, AppError> {
    let path = override_path.or_else(|| config.dataset.candidates_path.clone());
    match path {
        Some(path) => Ok(CandidateCatalog::from_path(path)?),
        None => Ok(sample_catalog()),
    }
}

/// Embedded stand-in for `data/candidates.json`, used when no dataset is
/// configured. Keeps the server and demos runnable out of the box.
pub(crate) fn sample_catalog() -> CandidateCatalog {
    let candidates = vec![
        sample_candidate(
            "m-reyes",
            "Marisol Reyes",
            "AZ-06",
            Competitiveness::Tossup,
            (47.0, 48.0, 3.0),
            (1_200_000, 2_400_000),
            &["climate", "healthcare", "economy"],
            DonationLeverage::High,
            40,
            "https://example.org/reyes",
            "Former mayor focused on water policy and grid reliability.",
        ),
        sample_candidate(
            "d-okafor",
            "David Okafor",
            "OH-13",
            Competitiveness::Lean,
            (44.0, 46.0, 4.0),
            (800_000, 600_000),
            &["economy", "education"],
            DonationLeverage::Medium,
            120,
            "https://example.org/okafor",
            "Union electrician turned school-board member.",
        ),
        sample_candidate(
            "l-braun",
            "Lena Braun",
            "MT-01",
            Competitiveness::Safe,
            (41.0, 52.0, 3.5),
            (300_000, 1_500_000),
            &["climate", "crime"],
            DonationLeverage::MedHigh,
            200,
            "https://example.org/braun",
            "Rancher running on public-lands access.",
        ),
        sample_candidate(
            "s-nguyen",
            "Sofia Nguyen",
            "VA-02",
            Competitiveness::Tossup,
            (46.0, 46.0, 2.5),
            (2_000_000, 1_800_000),
            &["healthcare", "immigration", "education"],
            DonationLeverage::MedHigh,
            65,
            "https://example.org/nguyen",
            "Navy veteran and community-clinic director.",
        ),
        sample_candidate(
            "r-hale",
            "Ruth Hale",
            "NC-09",
            Competitiveness::Lean,
            (45.0, 47.0, 3.0),
            (500_000, 1_900_000),
            &["economy", "crime", "healthcare"],
            DonationLeverage::High,
            90,
            "https://example.org/hale",
            "Small-business owner campaigning on rural broadband.",
        ),
        sample_candidate(
            "t-marsh",
            "Theo Marsh",
            "CA-22",
            Competitiveness::Safe,
            (43.0, 51.0, 4.0),
            (400_000, 700_000),
            &["climate", "immigration"],
            DonationLeverage::Low,
            300,
            "https://example.org/marsh",
            "Water-district engineer running a first campaign.",
        ),
    ];

    CandidateCatalog::new(candidates).expect("embedded sample candidates are well-formed")
}

#[allow(clippy::too_many_arguments)]
fn sample_candidate(
    id: &str,
    name: &str,
    district: &str,
    competitiveness: Competitiveness,
    polling: (f32, f32, f32),
    funding: (u64, u64),
    issues: &[&str],
    donation_leverage: DonationLeverage,
    time_to_election_days: u32,
    site: &str,
    profile: &str,
) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: name.to_string(),
        district: district.to_string(),
        polling: PollingSnapshot {
            us: polling.0,
            them: polling.1,
            moe: polling.2,
        },
        funding: FundingSnapshot {
            us: funding.0,
            them: funding.1,
        },
        issues: issues.iter().map(|issue| issue.to_string()).collect(),
        donation_leverage,
        time_to_election_days,
        competitiveness,
        site: site.to_string(),
        profile: profile.to_string(),
    }
}
