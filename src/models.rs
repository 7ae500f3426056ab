use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One entry of the upstream license catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSummary {
    /// Short identifier used in the detail URL, e.g. `mit` or `apache-2.0`.
    pub key: String,
    /// Display name shown in the picker.
    pub name: String,
}

/// Subset of the detail endpoint's response that we use.
#[derive(Debug, Deserialize)]
pub struct LicenseDetail {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// The file already existed and the user chose to keep it.
    Cancelled,
}

/// How an `add_license` run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    Cancelled,
    NothingSelected,
}

impl From<WriteOutcome> for Outcome {
    fn from(outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Written(path) => Outcome::Written(path),
            WriteOutcome::Cancelled => Outcome::Cancelled,
        }
    }
}

impl std::fmt::Display for LicenseSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.key)
    }
}
