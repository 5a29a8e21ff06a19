use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, DonationStrategy, UserPreferences};
use super::scoring::ScoringEngine;

/// How many candidates a spread donation covers at most.
pub const SPREAD_TARGET_COUNT: usize = 3;

/// Default donation total in whole dollars when the caller names none.
pub const DEFAULT_DONATION_AMOUNT: u32 = 50;

/// A candidate paired with its computed match score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

impl RankedCandidate {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }

    pub fn view(&self) -> RankedCandidateView {
        RankedCandidateView {
            candidate_id: self.candidate.id.clone(),
            name: self.candidate.name.clone(),
            district: self.candidate.district.clone(),
            score: self.score,
            band: self.band().label(),
            donation_leverage: self.candidate.donation_leverage.label(),
            issues: self.candidate.issues.clone(),
        }
    }
}

/// Sanitized per-candidate row for ranking responses.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidateView {
    pub candidate_id: CandidateId,
    pub name: String,
    pub district: String,
    pub score: f64,
    pub band: &'static str,
    pub donation_leverage: &'static str,
    pub issues: Vec<String>,
}

/// Score every candidate and order the result best-first.
///
/// The sort is stable, so candidates with equal scores keep their catalog
/// order. An empty input yields an empty ranking.
pub fn rank_candidates(
    engine: &ScoringEngine,
    candidates: &[Candidate],
    preferences: &UserPreferences,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|candidate| RankedCandidate {
            candidate: candidate.clone(),
            score: engine.score(candidate, preferences),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Display band for a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 0.8 {
            ScoreBand::Excellent
        } else if score >= 0.6 {
            ScoreBand::Good
        } else if score >= 0.4 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        }
    }
}

/// One candidate's share of a donation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationAllocation {
    pub candidate_id: CandidateId,
    pub amount: u32,
}

/// Concrete split of a donation total across the chosen candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationPlan {
    pub strategy: DonationStrategy,
    pub total_amount: u32,
    pub allocations: Vec<DonationAllocation>,
}

impl DonationPlan {
    /// Split `total_amount` over the ranked list according to the strategy.
    ///
    /// Spread divides evenly (floor) across the top candidates; any
    /// remainder is left unallocated. Single puts the whole amount on the
    /// leader.
    pub fn build(
        ranked: &[RankedCandidate],
        strategy: DonationStrategy,
        total_amount: u32,
    ) -> Self {
        let allocations = match strategy {
            DonationStrategy::Single => ranked
                .first()
                .map(|leader| DonationAllocation {
                    candidate_id: leader.candidate.id.clone(),
                    amount: total_amount,
                })
                .into_iter()
                .collect(),
            DonationStrategy::Spread => {
                let recipients: Vec<&RankedCandidate> =
                    ranked.iter().take(SPREAD_TARGET_COUNT).collect();
                if recipients.is_empty() {
                    Vec::new()
                } else {
                    let share = total_amount / recipients.len() as u32;
                    recipients
                        .into_iter()
                        .map(|entry| DonationAllocation {
                            candidate_id: entry.candidate.id.clone(),
                            amount: share,
                        })
                        .collect()
                }
            }
        };

        Self {
            strategy,
            total_amount,
            allocations,
        }
    }

    /// Plan for an explicitly chosen candidate, bypassing the ranking.
    pub fn single(candidate_id: CandidateId, total_amount: u32) -> Self {
        Self {
            strategy: DonationStrategy::Single,
            total_amount,
            allocations: vec![DonationAllocation {
                candidate_id,
                amount: total_amount,
            }],
        }
    }

    pub fn allocated_total(&self) -> u32 {
        self.allocations
            .iter()
            .map(|allocation| allocation.amount)
            .sum()
    }
}
