mod import;

pub use import::CandidateCsvImporter;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::domain::{Candidate, CandidateId};
use super::intake::{CandidateDataError, CandidateGuard};

/// Errors raised while loading a candidate dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read candidate dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid candidate JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid candidate CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid {field} '{value}' in CSV row {row}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error(transparent)]
    Invalid(#[from] CandidateDataError),
    #[error("unsupported dataset extension for '{0}'")]
    UnsupportedFormat(String),
}

/// In-memory candidate list provider backing ranking and explanations.
///
/// Every constructor runs the intake guard, so a catalog only ever holds
/// well-formed, uniquely identified candidates in dataset order.
#[derive(Debug, Clone, Default)]
pub struct CandidateCatalog {
    candidates: Vec<Candidate>,
}

impl CandidateCatalog {
    /// Admit a pre-built candidate list (embedded samples, tests).
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, CandidateDataError> {
        let candidates = CandidateGuard::default().admit(candidates)?;
        Ok(Self { candidates })
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let candidates: Vec<Candidate> = serde_json::from_reader(reader)?;
        Ok(Self::new(candidates)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Load a dataset, dispatching on the file extension (`json` or `csv`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_path(path),
            Some("csv") => CandidateCsvImporter::from_path(path),
            _ => Err(DatasetError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| &candidate.id == id)
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
