//! Launch sequencer - credential check, readiness wait, environment, handoff

use super::environment::LaunchEnvironment;
use super::process::ProcessConfig;
use super::readiness::{ReadinessGate, ReadinessResult, RetryPolicy, ServiceEndpoint};
use crate::config::AddonOptions;
use crate::error::LaunchError;
use std::fmt;

/// Default wrapped application executable
pub const DEFAULT_APP: &str = "govee2mqtt-v2";

/// Default service the application depends on
pub const DEFAULT_SERVICE: &str = "mqtt";

/// Launcher configuration
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Supervisor service to wait for
    pub service: String,
    /// Polling policy for the readiness wait
    pub policy: RetryPolicy,
    /// Application executable
    pub executable: String,
    /// Arguments forwarded to the application
    pub app_args: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            policy: RetryPolicy::default(),
            executable: DEFAULT_APP.to_string(),
            app_args: Vec::new(),
        }
    }
}

/// Fully resolved launch, ready to hand off
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    /// Broker the application will connect to
    pub endpoint: ServiceEndpoint,
    /// Process to start
    pub process: ProcessConfig,
}

impl LaunchPlan {
    /// Hand control to the application; see [`ProcessConfig::handoff`]
    pub fn execute(&self) -> Result<i32, LaunchError> {
        Ok(self.process.handoff()?)
    }
}

impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Launch Plan")?;
        writeln!(f, "===========")?;
        writeln!(f)?;
        writeln!(f, "Broker: {}", self.endpoint.address())?;
        writeln!(
            f,
            "Command: {} {}",
            self.process.executable,
            self.process.args.join(" ")
        )?;
        writeln!(f)?;
        writeln!(f, "Environment:")?;
        for line in self.process.env.redacted().to_string().lines() {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

/// Drives the launch sequence
pub struct Launcher {
    config: LaunchConfig,
}

impl Launcher {
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Validate options, wait for the service and build the launch plan.
    ///
    /// Option validation happens before the first probe, so a missing API key
    /// never touches the network.
    pub fn prepare<P, C>(
        &self,
        options: &AddonOptions,
        probe: P,
        connect_check: C,
    ) -> Result<LaunchPlan, LaunchError>
    where
        P: FnMut() -> Option<ServiceEndpoint>,
        C: FnMut(&ServiceEndpoint) -> bool,
    {
        options.validate()?;

        log::info!(
            "Waiting for service '{}' (up to {} attempts, {:?} apart)",
            self.config.service,
            self.config.policy.max_attempts,
            self.config.policy.interval
        );

        let endpoint = match ReadinessGate::new(&self.config.service, self.config.policy.clone())
            .wait(probe, connect_check)
        {
            ReadinessResult::Ready(endpoint) => endpoint,
            ReadinessResult::TimedOut => {
                return Err(LaunchError::ServiceUnavailable {
                    service: self.config.service.clone(),
                    attempts: self.config.policy.max_attempts,
                })
            }
        };

        let env = LaunchEnvironment::assemble(options, &endpoint);
        log::debug!("Application environment:\n{}", env.redacted());

        Ok(LaunchPlan {
            endpoint,
            process: ProcessConfig {
                name: DEFAULT_APP.to_string(),
                executable: self.config.executable.clone(),
                args: self.config.app_args.clone(),
                env,
            },
        })
    }
}
