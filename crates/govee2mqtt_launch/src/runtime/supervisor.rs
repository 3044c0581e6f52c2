//! Home Assistant Supervisor service-discovery client
//!
//! Blocking client for `GET /services/{name}`. The Supervisor answers with an
//! envelope of the form `{"result": "ok", "data": {...}}`; a service that is
//! not provided by any add-on yields a non-success status or an empty `data`.

use super::readiness::ServiceEndpoint;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Supervisor API base URL inside an add-on container.
pub const DEFAULT_SUPERVISOR_URL: &str = "http://supervisor";

/// Per-request timeout so a hung Supervisor cannot stall the readiness loop.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from Supervisor API operations.
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Supervisor returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Supervisor reported failure: {0}")]
    Api(String),

    #[error("Service '{0}' is not provided")]
    NotProvided(String),

    #[error("Malformed service data: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    result: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Client for the Supervisor REST API
#[derive(Debug)]
pub struct SupervisorClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl SupervisorClient {
    /// Create a client with an explicit base URL and token
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, SupervisorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create a client from `SUPERVISOR_TOKEN` (or the legacy `HASSIO_TOKEN`).
    ///
    /// A missing token is not an error here: every probe will fail and the
    /// readiness wait times out with a clear message instead.
    pub fn from_env(base_url: impl Into<String>) -> Result<Self, SupervisorError> {
        let token = std::env::var("SUPERVISOR_TOKEN")
            .or_else(|_| std::env::var("HASSIO_TOKEN"))
            .ok()
            .filter(|t| !t.is_empty());

        if token.is_none() {
            log::warn!("SUPERVISOR_TOKEN is not set; service discovery requests will be rejected");
        }

        Self::new(base_url, token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch connection parameters for a service
    pub fn service(&self, name: &str) -> Result<ServiceEndpoint, SupervisorError> {
        let url = format!("{}/services/{}", self.base_url, name);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SupervisorError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text()?;
        parse_service_response(name, &body)
    }

    /// Probe a service: `Some(endpoint)` when it is registered, `None` otherwise
    pub fn probe(&self, name: &str) -> Option<ServiceEndpoint> {
        match self.service(name) {
            Ok(endpoint) => Some(endpoint),
            Err(e) => {
                log::debug!("[{}] Probe failed: {}", name, e);
                None
            }
        }
    }
}

/// Decode a `/services/{name}` response body
pub fn parse_service_response(name: &str, body: &str) -> Result<ServiceEndpoint, SupervisorError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.result != "ok" {
        return Err(SupervisorError::Api(
            envelope
                .message
                .unwrap_or_else(|| format!("result '{}'", envelope.result)),
        ));
    }

    match envelope.data {
        Some(Value::Object(map)) if !map.is_empty() => {
            Ok(serde_json::from_value(Value::Object(map))?)
        }
        _ => Err(SupervisorError::NotProvided(name.to_string())),
    }
}
