//! Add-on options schema (`/data/options.json`)

use super::LogLevel;
use crate::error::LaunchError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Path where the Supervisor writes the add-on options
pub const DEFAULT_OPTIONS_PATH: &str = "/data/options.json";

/// User-facing add-on options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonOptions {
    /// Govee Platform API key (mandatory)
    #[serde(default)]
    pub govee_api_key: Option<String>,

    /// Base topic for state and command messages
    #[serde(default = "default_base_topic")]
    pub mqtt_base_topic: String,

    /// Device state poll interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Log level for the launcher and the wrapped application
    #[serde(default)]
    pub log_level: LogLevel,

    /// Override for the Govee API endpoint
    #[serde(default)]
    pub api_base_url: Option<String>,
}

fn default_base_topic() -> String {
    "govee2mqtt".to_string()
}

fn default_poll_interval() -> u64 {
    60
}

impl Default for AddonOptions {
    fn default() -> Self {
        Self {
            govee_api_key: None,
            mqtt_base_topic: default_base_topic(),
            poll_interval: default_poll_interval(),
            log_level: LogLevel::default(),
            api_base_url: None,
        }
    }
}

impl AddonOptions {
    /// Load options from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LaunchError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LaunchError::OptionsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| LaunchError::OptionsParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parse options from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The API key, if present and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.govee_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// The API base URL override, if present and not blank
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Check the options before any network activity
    pub fn validate(&self) -> Result<(), LaunchError> {
        if self.api_key().is_none() {
            return Err(LaunchError::MissingCredential);
        }
        if self.poll_interval == 0 {
            return Err(LaunchError::InvalidOptions(
                "poll_interval must be a positive number of seconds".to_string(),
            ));
        }
        if self.mqtt_base_topic.trim().is_empty() {
            return Err(LaunchError::InvalidOptions(
                "mqtt_base_topic must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
