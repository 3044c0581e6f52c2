//! Environment handed to the wrapped application
//!
//! Variable names are read verbatim by govee2mqtt-v2 and must not change.

use super::readiness::ServiceEndpoint;
use crate::config::AddonOptions;
use indexmap::IndexMap;
use std::fmt;

pub const ENV_API_KEY: &str = "GOVEE_API_KEY";
pub const ENV_API_BASE_URL: &str = "GOVEE_API_BASE_URL";
pub const ENV_MQTT_HOST: &str = "MQTT_HOST";
pub const ENV_MQTT_PORT: &str = "MQTT_PORT";
pub const ENV_MQTT_USERNAME: &str = "MQTT_USERNAME";
pub const ENV_MQTT_PASSWORD: &str = "MQTT_PASSWORD";
pub const ENV_MQTT_BASE_TOPIC: &str = "MQTT_BASE_TOPIC";
pub const ENV_POLL_INTERVAL: &str = "POLL_INTERVAL_SECONDS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

const SECRET_VARS: &[&str] = &[ENV_API_KEY, ENV_MQTT_PASSWORD];

/// Ordered set of variables exported to the child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchEnvironment {
    vars: IndexMap<String, String>,
}

impl LaunchEnvironment {
    /// Assemble the environment from validated options and a ready broker
    pub fn assemble(options: &AddonOptions, broker: &ServiceEndpoint) -> Self {
        let mut env = Self::default();

        env.set(ENV_API_KEY, options.api_key().unwrap_or_default());
        env.set(ENV_MQTT_HOST, &broker.host);
        env.set(ENV_MQTT_PORT, broker.port.to_string());
        env.set(ENV_MQTT_USERNAME, broker.username.as_deref().unwrap_or_default());
        env.set(ENV_MQTT_PASSWORD, broker.password.as_deref().unwrap_or_default());
        env.set(ENV_MQTT_BASE_TOPIC, options.mqtt_base_topic.trim());
        env.set(ENV_POLL_INTERVAL, options.poll_interval.to_string());
        env.set(ENV_LOG_LEVEL, options.log_level.as_app_value());

        if let Some(url) = options.api_base_url() {
            env.set(ENV_API_BASE_URL, url);
        }

        env
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Display adapter that masks secrets
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

/// Renders `KEY=value` lines with secret values masked
pub struct Redacted<'a>(&'a LaunchEnvironment);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.0.iter() {
            let shown = if SECRET_VARS.contains(&key) && !value.is_empty() {
                "***"
            } else {
                value
            };
            writeln!(f, "{}={}", key, shown)?;
        }
        Ok(())
    }
}
