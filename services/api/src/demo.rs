use crate::infra::{load_catalog, InMemoryPreferenceRepository};
use chrono::Local;
use clap::Args;
use donate_impact::config::AppConfig;
use donate_impact::error::AppError;
use donate_impact::matching::{
    rank_candidates, DonationStrategy, ImpactFocus, MatchService, RankedCandidate, ScoringConfig,
    ScoringEngine, UserPreferences, CANONICAL_ISSUES, DEFAULT_DONATION_AMOUNT,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Issue tag the donor cares about (repeatable)
    #[arg(long = "issue")]
    pub(crate) issues: Vec<String>,
    /// Impact focus: close, track, or infra
    #[arg(long, value_parser = parse_impact)]
    pub(crate) impact: Option<ImpactFocus>,
    /// Donation strategy: single or spread
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Option<DonationStrategy>,
    /// Candidate dataset path (.json or .csv); defaults to the embedded sample
    #[arg(long)]
    pub(crate) candidates: Option<PathBuf>,
    /// Show at most this many candidates
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the per-factor score breakdown for every listed candidate
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Candidate dataset path (.json or .csv); defaults to the embedded sample
    #[arg(long)]
    pub(crate) candidates: Option<PathBuf>,
    /// Donation total in whole dollars
    #[arg(long, default_value_t = DEFAULT_DONATION_AMOUNT)]
    pub(crate) amount: u32,
    /// Skip the allocation portion of the demo
    #[arg(long)]
    pub(crate) skip_plan: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        issues,
        impact,
        strategy,
        candidates,
        limit,
        explain,
    } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(candidates, &config)?;

    if issues.is_empty() {
        println!(
            "No --issue given; issue match scores 0. Known tags: {}",
            CANONICAL_ISSUES.join(", ")
        );
    }

    let preferences = UserPreferences {
        issues,
        impact,
        strategy,
    };

    let engine = ScoringEngine::default();
    let ranked = rank_candidates(&engine, catalog.candidates(), &preferences);
    let shown = limit.unwrap_or(ranked.len()).min(ranked.len());

    println!(
        "Ranked {} of {} candidates (evaluated {})",
        shown,
        ranked.len(),
        Local::now().date_naive()
    );
    print_preferences(&preferences);
    println!();

    for (position, entry) in ranked.iter().take(shown).enumerate() {
        print_ranked_row(position + 1, entry);
        if explain {
            let breakdown = engine.explain(&entry.candidate, &preferences);
            for (label, component) in breakdown.components() {
                println!(
                    "      {label}: {:.3} x {:.2} = {:.4}",
                    component.value, component.weight, component.contribution
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        candidates,
        amount,
        skip_plan,
    } = args;

    let config = AppConfig::load()?;
    let catalog = Arc::new(load_catalog(candidates, &config)?);
    let repository = Arc::new(InMemoryPreferenceRepository::default());
    let service = Arc::new(MatchService::new(
        repository,
        catalog.clone(),
        ScoringConfig::default(),
    ));

    println!("Donation matching demo");
    println!("Catalog: {} candidates", catalog.len());

    let preferences = UserPreferences {
        issues: vec!["climate".to_string(), "healthcare".to_string()],
        impact: Some(ImpactFocus::Close),
        strategy: Some(DonationStrategy::Spread),
    };
    print_preferences(&preferences);

    let record = match service.save_preferences(preferences, 3) {
        Ok(record) => record,
        Err(err) => {
            println!("  Preference save rejected: {}", err);
            return Ok(());
        }
    };
    println!("- Stored preference record {}", record.preference_id);

    let ranked = match service.rank_stored(&record.preference_id) {
        Ok(ranked) => ranked,
        Err(err) => {
            println!("  Ranking unavailable: {}", err);
            return Ok(());
        }
    };

    println!("\nRanked matches");
    for (position, entry) in ranked.iter().enumerate() {
        print_ranked_row(position + 1, entry);
    }

    if let Some(leader) = ranked.first() {
        println!("\nWhy {} leads", leader.candidate.name);
        match service.explain(&leader.candidate.id, &record.preferences) {
            Ok(breakdown) => {
                for (label, component) in breakdown.components() {
                    println!(
                        "- {label}: {:.3} x {:.2} = {:.4}",
                        component.value, component.weight, component.contribution
                    );
                }
                println!("- total (rounded): {:.2}", breakdown.total);
            }
            Err(err) => println!("  Explanation unavailable: {}", err),
        }
    }

    if skip_plan {
        return Ok(());
    }

    println!("\nDonation plan (${amount} total)");
    match service.donation_plan(&record.preference_id, amount) {
        Ok(plan) => {
            for allocation in &plan.allocations {
                let name = catalog
                    .get(&allocation.candidate_id)
                    .map(|candidate| candidate.name.as_str())
                    .unwrap_or("unknown");
                println!("- {}: ${}", name, allocation.amount);
            }
            if plan.allocated_total() < plan.total_amount {
                println!(
                    "- unallocated remainder: ${}",
                    plan.total_amount - plan.allocated_total()
                );
            }
            match serde_json::to_string_pretty(&plan) {
                Ok(json) => println!("\nPlan payload:\n{}", json),
                Err(err) => println!("  Plan payload unavailable: {}", err),
            }
        }
        Err(err) => println!("  Plan unavailable: {}", err),
    }

    Ok(())
}

fn print_preferences(preferences: &UserPreferences) {
    println!(
        "Preferences: issues [{}] | impact {} | strategy {}",
        preferences.issues.join(", "),
        preferences
            .impact
            .map(|impact| impact.label())
            .unwrap_or("not selected"),
        preferences
            .strategy
            .map(|strategy| strategy.label())
            .unwrap_or("not selected"),
    );
}

fn print_ranked_row(position: usize, entry: &RankedCandidate) {
    println!(
        "{:>3}. {:<20} {:<7} score {:.2} ({}) | {} | leverage {}",
        position,
        entry.candidate.name,
        entry.candidate.district,
        entry.score,
        entry.band().label(),
        entry.candidate.competitiveness.label(),
        entry.candidate.donation_leverage.label(),
    );
}

fn parse_impact(raw: &str) -> Result<ImpactFocus, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "close" => Ok(ImpactFocus::Close),
        "track" => Ok(ImpactFocus::Track),
        "infra" => Ok(ImpactFocus::Infra),
        other => Err(format!(
            "unknown impact focus '{other}' (expected close, track, or infra)"
        )),
    }
}

fn parse_strategy(raw: &str) -> Result<DonationStrategy, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "single" => Ok(DonationStrategy::Single),
        "spread" => Ok(DonationStrategy::Spread),
        other => Err(format!(
            "unknown strategy '{other}' (expected single or spread)"
        )),
    }
}
