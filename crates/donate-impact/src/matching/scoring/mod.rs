mod rules;
mod weights;

pub use weights::{
    WeightPolicy, WeightProfile, CLOSE_RACES_WEIGHTS, DEFAULT_WEIGHTS, INFRASTRUCTURE_WEIGHTS,
    TRACK_RECORD_WEIGHTS,
};

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, UserPreferences};
use rules::{factor_scores, FactorScores};

/// Tunable knobs for the scoring engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringConfig {
    pub weight_policy: WeightPolicy,
}

/// Stateless engine producing match scores and their breakdowns.
///
/// Both entry points run the same factor pass and the same weight
/// resolution, so an explanation can never drift from the score it
/// explains.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Composite match score in [0, 1], rounded to two decimals.
    pub fn score(&self, candidate: &Candidate, preferences: &UserPreferences) -> f64 {
        self.explain(candidate, preferences).total
    }

    /// Per-factor breakdown with unrounded contributions.
    pub fn explain(&self, candidate: &Candidate, preferences: &UserPreferences) -> ScoreBreakdown {
        let scores = factor_scores(candidate, preferences);
        let weights = WeightProfile::resolve(self.config.weight_policy, preferences.impact);
        ScoreBreakdown::compose(scores, weights)
    }
}

/// Discrete contribution of one factor to a match score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
}

impl ScoreComponent {
    fn from_parts(value: f64, weight: f64) -> Self {
        Self {
            value,
            weight,
            contribution: value * weight,
        }
    }
}

/// Full scoring trail for one candidate under one preference set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub competitiveness: ScoreComponent,
    pub funding_gap: ScoreComponent,
    pub time_decay: ScoreComponent,
    pub issue_match: ScoreComponent,
    /// Sum of the four contributions, rounded to two decimals.
    pub total: f64,
}

impl ScoreBreakdown {
    fn compose(scores: FactorScores, weights: WeightProfile) -> Self {
        let competitiveness =
            ScoreComponent::from_parts(scores.competitiveness, weights.competitiveness);
        let funding_gap = ScoreComponent::from_parts(scores.funding_gap, weights.funding_gap);
        let time_decay = ScoreComponent::from_parts(scores.time_decay, weights.time_decay);
        let issue_match = ScoreComponent::from_parts(scores.issue_match, weights.issue_match);

        let total = round_to_hundredths(
            competitiveness.contribution
                + funding_gap.contribution
                + time_decay.contribution
                + issue_match.contribution,
        );

        Self {
            competitiveness,
            funding_gap,
            time_decay,
            issue_match,
            total,
        }
    }

    /// Unrounded sum of the contributions.
    pub fn raw_total(&self) -> f64 {
        self.competitiveness.contribution
            + self.funding_gap.contribution
            + self.time_decay.contribution
            + self.issue_match.contribution
    }

    /// Labeled factors in display order.
    pub fn components(&self) -> [(&'static str, ScoreComponent); 4] {
        [
            ("competitiveness", self.competitiveness),
            ("funding gap", self.funding_gap),
            ("time decay", self.time_decay),
            ("issue match", self.issue_match),
        ]
    }
}

fn round_to_hundredths(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
