use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for stored donor preference records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreferenceId(pub String);

impl fmt::Display for PreferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Categorical estimate of how contested a race is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competitiveness {
    Tossup,
    Lean,
    Safe,
}

impl Competitiveness {
    pub const fn label(self) -> &'static str {
        match self {
            Competitiveness::Tossup => "tossup",
            Competitiveness::Lean => "lean",
            Competitiveness::Safe => "safe",
        }
    }
}

/// Display-only categorical estimate of how far a marginal dollar goes.
/// Never consumed by scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationLeverage {
    #[serde(rename = "high")]
    High,
    #[serde(rename = "med-high")]
    MedHigh,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "low")]
    Low,
}

impl DonationLeverage {
    pub const fn label(self) -> &'static str {
        match self {
            DonationLeverage::High => "high",
            DonationLeverage::MedHigh => "med-high",
            DonationLeverage::Medium => "medium",
            DonationLeverage::Low => "low",
        }
    }
}

/// Total raised funds for the candidate and their opponent, in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingSnapshot {
    pub us: u64,
    pub them: u64,
}

/// Head-to-head polling with margin of error, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollingSnapshot {
    pub us: f32,
    pub them: f32,
    pub moe: f32,
}

/// Immutable candidate record as supplied by the dataset.
///
/// Field names follow the dataset's camelCase wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub district: String,
    pub polling: PollingSnapshot,
    pub funding: FundingSnapshot,
    pub issues: Vec<String>,
    pub donation_leverage: DonationLeverage,
    pub time_to_election_days: u32,
    pub competitiveness: Competitiveness,
    pub site: String,
    pub profile: String,
}

/// Where the donor wants their marginal dollar to land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactFocus {
    Close,
    Track,
    Infra,
}

impl ImpactFocus {
    pub const fn label(self) -> &'static str {
        match self {
            ImpactFocus::Close => "close races",
            ImpactFocus::Track => "track record",
            ImpactFocus::Infra => "long-term infrastructure",
        }
    }
}

/// Whether the donation goes to one candidate or is spread over several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStrategy {
    Single,
    Spread,
}

impl DonationStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            DonationStrategy::Single => "single high-impact",
            DonationStrategy::Spread => "spread across several",
        }
    }
}

/// Donor answers collected by the preference wizard.
///
/// `impact` is a single optional selection; it keys the adaptive weight
/// profile. An empty issue list is valid and scores issue match as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub impact: Option<ImpactFocus>,
    #[serde(default)]
    pub strategy: Option<DonationStrategy>,
}

/// Issue tags offered by the preference wizard. Scoring accepts any tag;
/// this list only seeds UIs and demos.
pub const CANONICAL_ISSUES: [&str; 6] = [
    "climate",
    "healthcare",
    "immigration",
    "economy",
    "crime",
    "education",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_round_trips_camel_case_wire_shape() {
        let raw = r#"{
            "id": "j-ruiz",
            "name": "Jordan Ruiz",
            "district": "NV-04",
            "polling": { "us": 46.0, "them": 47.0, "moe": 3.5 },
            "funding": { "us": 900000, "them": 2100000 },
            "issues": ["climate", "economy"],
            "donationLeverage": "med-high",
            "timeToElectionDays": 60,
            "competitiveness": "tossup",
            "site": "https://example.org",
            "profile": "County commissioner running on grid resilience."
        }"#;

        let candidate: Candidate = serde_json::from_str(raw).expect("candidate parses");
        assert_eq!(candidate.id, CandidateId("j-ruiz".to_string()));
        assert_eq!(candidate.donation_leverage, DonationLeverage::MedHigh);
        assert_eq!(candidate.time_to_election_days, 60);
        assert_eq!(candidate.competitiveness, Competitiveness::Tossup);

        let encoded = serde_json::to_value(&candidate).expect("candidate encodes");
        assert_eq!(encoded["donationLeverage"], "med-high");
        assert_eq!(encoded["timeToElectionDays"], 60);
    }

    #[test]
    fn rejects_unknown_competitiveness_value() {
        let raw = r#""landslide""#;
        let parsed: Result<Competitiveness, _> = serde_json::from_str(raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_negative_funding_amounts() {
        let raw = r#"{ "us": -5000, "them": 10000 }"#;
        let parsed: Result<FundingSnapshot, _> = serde_json::from_str(raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn preferences_default_to_empty_wizard_state() {
        let preferences = UserPreferences::default();
        assert!(preferences.issues.is_empty());
        assert!(preferences.impact.is_none());
        assert!(preferences.strategy.is_none());

        let parsed: UserPreferences = serde_json::from_str("{}").expect("empty object parses");
        assert_eq!(parsed, preferences);
    }
}
