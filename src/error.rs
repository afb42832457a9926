//! Error types for the license store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure is terminal for the call that raised it.
#[derive(Debug, Error)]
pub enum LicenseError {
    #[error("Failed to open license file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read license file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file does not end on a line boundary. Never repaired automatically.
    #[error("License file {} is corrupted, ended with '{last_line}'", path.display())]
    Corrupt { path: PathBuf, last_line: String },

    #[error("License '{token}' is not a valid token")]
    InvalidToken { token: String },

    #[error("Unable to identify license file location")]
    UnresolvedPath,

    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write license to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LicenseError>;
