//! govee2mqtt-v2 Add-on Launcher
//!
//! Starts the `govee2mqtt-v2` bridge inside a Home Assistant add-on container.
//!
//! # Overview
//!
//! The launcher:
//! - Reads the add-on options written by the Supervisor (`/data/options.json`)
//! - Refuses to start without a Govee API key
//! - Waits for the MQTT broker service to be registered and reachable
//! - Exports broker and option values as environment variables
//! - Replaces itself with the wrapped application
//!
//! # Example Options File
//!
//! ```json
//! {
//!   "govee_api_key": "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx",
//!   "mqtt_base_topic": "govee2mqtt",
//!   "poll_interval": 60,
//!   "log_level": "info"
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runtime;

pub use cli::LaunchArgs;
pub use config::{AddonOptions, LogLevel};
pub use error::LaunchError;
pub use runtime::{
    tcp_reachable, wait_for_service, LaunchConfig, LaunchEnvironment, LaunchPlan, Launcher,
    ProcessConfig, ProcessError, ReadinessGate, ReadinessResult, RetryPolicy, ServiceEndpoint,
    SupervisorClient, SupervisorError,
};
