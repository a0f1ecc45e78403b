use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Portal a job posting was scraped from (or `Manual` for hand-entered postings).
/// Serialized exactly as the scrapers write it into the `source` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobSource {
    PracticasPe,
    Computrabajo,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown job source '{0}'")]
pub struct UnknownSourceError(pub String);

impl JobSource {
    pub const ALL: [JobSource; 3] = [
        JobSource::PracticasPe,
        JobSource::Computrabajo,
        JobSource::Manual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobSource::PracticasPe => "PRACTICAS_PE",
            JobSource::Computrabajo => "COMPUTRABAJO",
            JobSource::Manual => "MANUAL",
        }
    }

    /// Practicas.pe flattens its detail pages into one run-on paragraph with
    /// inline headers; no other source follows that convention.
    pub fn uses_sectioned_descriptions(self) -> bool {
        matches!(self, JobSource::PracticasPe)
    }
}

impl FromStr for JobSource {
    type Err = UnknownSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| UnknownSourceError(s.to_string()))
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
