use std::path::PathBuf;

use thiserror::Error;

/// Every way adding a license can fail.
///
/// The `Display` text is what the user sees, so each variant reads as a
/// complete message.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The connection failed before a full response was received.
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request failed with status code: {status}")]
    Status { status: u16 },

    #[error("Failed to parse JSON response for licenses")]
    ParseList,

    #[error("Failed to parse JSON response for license content")]
    ParseContent,

    #[error("No open workspace found.")]
    NoWorkspace,

    #[error("Invalid license key: {0:?}")]
    InvalidKey(String),

    #[error("Unknown license: {0} (run with --list to see available keys)")]
    UnknownLicense(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an answer from, or drawing a prompt on, the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

impl From<reqwest::Error> for LicenseError {
    fn from(err: reqwest::Error) -> Self {
        LicenseError::Transport(err.to_string())
    }
}
