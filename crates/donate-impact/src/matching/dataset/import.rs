use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use super::super::domain::{
    Candidate, CandidateId, Competitiveness, DonationLeverage, FundingSnapshot, PollingSnapshot,
};
use super::{CandidateCatalog, DatasetError};

/// Importer for spreadsheet-maintained candidate datasets.
///
/// Expected header row:
/// `ID,Name,District,Competitiveness,Funding Us,Funding Them,Polling Us,
/// Polling Them,Polling MoE,Days To Election,Issues,Leverage,Site,Profile`
/// with issues pipe-separated inside their cell.
pub struct CandidateCsvImporter;

impl CandidateCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CandidateCatalog, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CandidateCatalog, DatasetError> {
        let candidates = parse_candidates(reader)?;
        Ok(CandidateCatalog::new(candidates)?)
    }
}

fn parse_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut candidates = Vec::new();

    for (index, record) in csv_reader.deserialize::<CandidateRow>().enumerate() {
        // Header occupies row 1 of the sheet.
        let row = index + 2;
        let parsed = record?;
        candidates.push(parsed.into_candidate(row)?);
    }

    Ok(candidates)
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Competitiveness")]
    competitiveness: String,
    #[serde(rename = "Funding Us")]
    funding_us: u64,
    #[serde(rename = "Funding Them")]
    funding_them: u64,
    #[serde(rename = "Polling Us")]
    polling_us: f32,
    #[serde(rename = "Polling Them")]
    polling_them: f32,
    #[serde(rename = "Polling MoE")]
    polling_moe: f32,
    #[serde(rename = "Days To Election")]
    time_to_election_days: u32,
    #[serde(rename = "Issues")]
    issues: String,
    #[serde(rename = "Leverage")]
    donation_leverage: String,
    #[serde(rename = "Site", default)]
    site: String,
    #[serde(rename = "Profile", default)]
    profile: String,
}

impl CandidateRow {
    fn into_candidate(self, row: usize) -> Result<Candidate, DatasetError> {
        let competitiveness = parse_competitiveness(&self.competitiveness).ok_or_else(|| {
            DatasetError::InvalidField {
                row,
                field: "competitiveness",
                value: self.competitiveness.clone(),
            }
        })?;
        let donation_leverage = parse_leverage(&self.donation_leverage).ok_or_else(|| {
            DatasetError::InvalidField {
                row,
                field: "leverage",
                value: self.donation_leverage.clone(),
            }
        })?;

        Ok(Candidate {
            id: CandidateId(self.id),
            name: self.name,
            district: self.district,
            polling: PollingSnapshot {
                us: self.polling_us,
                them: self.polling_them,
                moe: self.polling_moe,
            },
            funding: FundingSnapshot {
                us: self.funding_us,
                them: self.funding_them,
            },
            issues: split_issues(&self.issues),
            donation_leverage,
            time_to_election_days: self.time_to_election_days,
            competitiveness,
            site: self.site,
            profile: self.profile,
        })
    }
}

fn parse_competitiveness(value: &str) -> Option<Competitiveness> {
    match value.to_ascii_lowercase().as_str() {
        "tossup" => Some(Competitiveness::Tossup),
        "lean" => Some(Competitiveness::Lean),
        "safe" => Some(Competitiveness::Safe),
        _ => None,
    }
}

fn parse_leverage(value: &str) -> Option<DonationLeverage> {
    match value.to_ascii_lowercase().as_str() {
        "high" => Some(DonationLeverage::High),
        "med-high" => Some(DonationLeverage::MedHigh),
        "medium" => Some(DonationLeverage::Medium),
        "low" => Some(DonationLeverage::Low),
        _ => None,
    }
}

fn split_issues(cell: &str) -> Vec<String> {
    cell.split('|')
        .map(str::trim)
        .filter(|issue| !issue.is_empty())
        .map(String::from)
        .collect()
}
