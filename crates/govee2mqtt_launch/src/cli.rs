//! Command-line interface for govee2mqtt-launch

use crate::config::{LogLevel, DEFAULT_OPTIONS_PATH};
use crate::runtime::{
    LaunchConfig, RetryPolicy, DEFAULT_APP, DEFAULT_SERVICE, DEFAULT_SUPERVISOR_URL,
};
use argh::FromArgs;

/// Wait for the MQTT broker and start govee2mqtt-v2 with add-on options
#[derive(FromArgs, Debug)]
pub struct LaunchArgs {
    /// path to the add-on options file (default: /data/options.json)
    #[argh(option, default = "String::from(DEFAULT_OPTIONS_PATH)")]
    pub options: String,

    /// supervisor API base URL (default: http://supervisor)
    #[argh(option, default = "String::from(DEFAULT_SUPERVISOR_URL)")]
    pub supervisor_url: String,

    /// service to wait for (default: mqtt)
    #[argh(option, default = "String::from(DEFAULT_SERVICE)")]
    pub service: String,

    /// application executable to start (default: govee2mqtt-v2)
    #[argh(option, default = "String::from(DEFAULT_APP)")]
    pub app: String,

    /// show launch plan without executing
    #[argh(switch)]
    pub dry_run: bool,

    /// launcher log level; defaults to the add-on option
    #[argh(option, short = 'l', from_str_fn(parse_log_level))]
    pub log_level: Option<LogLevel>,

    /// arguments forwarded to the application (place after `--`)
    #[argh(positional)]
    pub app_args: Vec<String>,
}

/// Parse a log level name
fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| {
        format!(
            "Invalid log level '{}'. Expected one of: \
             trace, debug, info, notice, warning, error, fatal",
            s
        )
    })
}

impl LaunchArgs {
    /// Build the launcher configuration from the arguments
    pub fn launch_config(&self) -> LaunchConfig {
        LaunchConfig {
            service: self.service.clone(),
            policy: RetryPolicy::default(),
            executable: self.app.clone(),
            app_args: self.app_args.clone(),
        }
    }
}
