use super::super::domain::ImpactFocus;

/// Baseline profile, applied when the donor skipped the impact question.
pub const DEFAULT_WEIGHTS: WeightProfile = WeightProfile {
    competitiveness: 0.35,
    funding_gap: 0.35,
    time_decay: 0.15,
    issue_match: 0.15,
};

/// "Close races" focus: competitiveness dominates.
pub const CLOSE_RACES_WEIGHTS: WeightProfile = WeightProfile {
    competitiveness: 0.50,
    funding_gap: 0.30,
    time_decay: 0.10,
    issue_match: 0.10,
};

/// "Track record" focus: issue alignment outweighs race dynamics.
pub const TRACK_RECORD_WEIGHTS: WeightProfile = WeightProfile {
    competitiveness: 0.25,
    funding_gap: 0.25,
    time_decay: 0.15,
    issue_match: 0.35,
};

/// "Infrastructure" focus: urgency matters most, funding gap least.
pub const INFRASTRUCTURE_WEIGHTS: WeightProfile = WeightProfile {
    competitiveness: 0.25,
    funding_gap: 0.20,
    time_decay: 0.40,
    issue_match: 0.15,
};

/// Per-factor weights combined into the composite score. Every profile
/// defined here sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightProfile {
    pub competitiveness: f64,
    pub funding_gap: f64,
    pub time_decay: f64,
    pub issue_match: f64,
}

/// How the engine picks a weight profile for a scoring call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeightPolicy {
    /// Always apply [`DEFAULT_WEIGHTS`], ignoring the impact answer.
    Static,
    /// Key the profile off the donor's single impact selection.
    #[default]
    ImpactAdaptive,
}

impl WeightProfile {
    pub fn resolve(policy: WeightPolicy, impact: Option<ImpactFocus>) -> Self {
        match policy {
            WeightPolicy::Static => DEFAULT_WEIGHTS,
            WeightPolicy::ImpactAdaptive => match impact {
                None => DEFAULT_WEIGHTS,
                Some(ImpactFocus::Close) => CLOSE_RACES_WEIGHTS,
                Some(ImpactFocus::Track) => TRACK_RECORD_WEIGHTS,
                Some(ImpactFocus::Infra) => INFRASTRUCTURE_WEIGHTS,
            },
        }
    }

    pub fn sum(&self) -> f64 {
        self.competitiveness + self.funding_gap + self.time_decay + self.issue_match
    }
}
