//! Handoff to the wrapped application

use super::environment::LaunchEnvironment;
use std::process::{Command, ExitStatus};

/// Configuration for starting the wrapped application
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// Process name (for logging)
    pub name: String,
    /// Executable path or name looked up in `PATH`
    pub executable: String,
    /// Command line arguments
    pub args: Vec<String>,
    /// Environment variables added on top of the inherited environment
    pub env: LaunchEnvironment,
}

impl ProcessConfig {
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args).envs(self.env.iter());
        cmd
    }

    /// Replace the current process image with the application.
    ///
    /// Only returns if the exec itself failed.
    #[cfg(unix)]
    pub fn exec(&self) -> ProcessError {
        use std::os::unix::process::CommandExt;

        log::info!(
            "[{}] Exec: {} {}",
            self.name,
            self.executable,
            self.args.join(" ")
        );
        let source = self.command().exec();
        ProcessError::ExecFailed {
            name: self.name.clone(),
            source,
        }
    }

    /// Start the application as a child and wait for it to exit
    pub fn spawn_and_wait(&self) -> Result<ExitStatus, ProcessError> {
        log::info!(
            "[{}] Starting: {} {}",
            self.name,
            self.executable,
            self.args.join(" ")
        );

        let mut child = self
            .command()
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed {
                name: self.name.clone(),
                source: e,
            })?;
        let pid = child.id();
        log::debug!("[{}] Started with pid {}", self.name, pid);

        let status = child.wait().map_err(|e| ProcessError::WaitFailed {
            name: self.name.clone(),
            source: e,
        })?;
        log::info!("[{}] Process exited with code: {:?}", self.name, status.code());
        Ok(status)
    }

    /// Hand control to the application.
    ///
    /// On Unix the process image is replaced and this never returns `Ok`.
    #[cfg(unix)]
    pub fn handoff(&self) -> Result<i32, ProcessError> {
        Err(self.exec())
    }

    /// Hand control to the application.
    ///
    /// Returns the child's exit code for the caller to exit with.
    #[cfg(not(unix))]
    pub fn handoff(&self) -> Result<i32, ProcessError> {
        let status = self.spawn_and_wait()?;
        Ok(status.code().unwrap_or(1))
    }
}

/// Errors that can occur when starting the application
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to exec '{name}': {source}")]
    ExecFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn process '{name}': {source}")]
    SpawnFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for process '{name}': {source}")]
    WaitFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
