//! Launch failure taxonomy

use crate::runtime::process::ProcessError;
use std::path::PathBuf;

/// Errors that abort a launch
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Govee API key is not configured; set 'govee_api_key' in the add-on options")]
    MissingCredential,

    #[error("Service '{service}' did not become available after {attempts} attempts")]
    ServiceUnavailable { service: String, attempts: u32 },

    #[error("Invalid add-on options: {0}")]
    InvalidOptions(String),

    #[error("Failed to read options file '{}': {source}", .path.display())]
    OptionsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse options file '{}': {source}", .path.display())]
    OptionsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Process(#[from] ProcessError),
}
