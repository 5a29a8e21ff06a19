use super::super::domain::{Candidate, Competitiveness, FundingSnapshot, UserPreferences};

/// Scores further out than a year decay to zero.
const ELECTION_HORIZON_DAYS: f64 = 365.0;

/// The four normalized factor values before weighting. Each is in [0, 1].
pub(crate) struct FactorScores {
    pub competitiveness: f64,
    pub funding_gap: f64,
    pub time_decay: f64,
    pub issue_match: f64,
}

pub(crate) fn factor_scores(candidate: &Candidate, preferences: &UserPreferences) -> FactorScores {
    FactorScores {
        competitiveness: competitiveness_score(candidate.competitiveness),
        funding_gap: funding_gap_score(&candidate.funding),
        time_decay: time_decay_score(candidate.time_to_election_days),
        issue_match: issue_match_score(&preferences.issues, &candidate.issues),
    }
}

pub(crate) fn competitiveness_score(competitiveness: Competitiveness) -> f64 {
    match competitiveness {
        Competitiveness::Tossup => 1.0,
        Competitiveness::Lean => 0.6,
        Competitiveness::Safe => 0.2,
    }
}

/// How badly the candidate is outspent, normalized by the larger war chest.
/// The denominator floors at 1 so a race with no money on either side scores 0.
pub(crate) fn funding_gap_score(funding: &FundingSnapshot) -> f64 {
    let max_funding = funding.us.max(funding.them).max(1) as f64;
    clamp_unit((funding.them as f64 - funding.us as f64) / max_funding)
}

/// Linear urgency ramp: election day scores 1.0, a year or more out scores 0.
pub(crate) fn time_decay_score(time_to_election_days: u32) -> f64 {
    clamp_unit(1.0 - f64::from(time_to_election_days) / ELECTION_HORIZON_DAYS)
}

/// Coverage of the donor's selected tags, not the candidate's: the share of
/// selected issues the candidate also claims. Empty selection scores 0.
pub(crate) fn issue_match_score(selected: &[String], candidate_issues: &[String]) -> f64 {
    if selected.is_empty() {
        return 0.0;
    }

    let overlap = selected
        .iter()
        .filter(|issue| candidate_issues.contains(issue))
        .count();
    overlap as f64 / selected.len().max(1) as f64
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
