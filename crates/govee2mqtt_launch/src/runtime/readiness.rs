//! Bounded wait for a dependent service
//!
//! Each attempt asks the orchestrator whether the service is registered and,
//! if it is, makes one TCP reachability check. A service that is registered
//! but unreachable is retried exactly like one that is not registered.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Connection parameters for a discovered service
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceEndpoint {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ServiceEndpoint {
    /// Create an endpoint without credentials
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// Attach credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// `host:port` form used for socket resolution
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// How often and how long to poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(2),
        }
    }
}

/// Terminal outcome of a readiness wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessResult {
    Ready(ServiceEndpoint),
    TimedOut,
}

impl ReadinessResult {
    pub fn is_ready(&self) -> bool {
        matches!(self, ReadinessResult::Ready(_))
    }
}

/// Polls a service until it is registered and reachable, or attempts run out
pub struct ReadinessGate<S = fn(Duration)> {
    service: String,
    policy: RetryPolicy,
    sleep: S,
}

impl ReadinessGate {
    /// Create a gate that sleeps the current thread between attempts
    pub fn new(service: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            service: service.into(),
            policy,
            sleep: std::thread::sleep,
        }
    }
}

impl<S: FnMut(Duration)> ReadinessGate<S> {
    /// Replace the sleep function (tests count sleeps instead of waiting)
    pub fn with_sleeper<T: FnMut(Duration)>(self, sleep: T) -> ReadinessGate<T> {
        ReadinessGate {
            service: self.service,
            policy: self.policy,
            sleep,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Log prefix; empty for an unnamed gate
    fn tag(&self) -> String {
        if self.service.is_empty() {
            String::new()
        } else {
            format!("[{}] ", self.service)
        }
    }

    /// Run the polling loop
    pub fn wait<P, C>(&mut self, mut probe: P, mut connect_check: C) -> ReadinessResult
    where
        P: FnMut() -> Option<ServiceEndpoint>,
        C: FnMut(&ServiceEndpoint) -> bool,
    {
        let max = self.policy.max_attempts;
        let tag = self.tag();

        for attempt in 1..=max {
            match probe() {
                Some(endpoint) => {
                    if connect_check(&endpoint) {
                        log::info!(
                            "{}Ready at {} (attempt {}/{})",
                            tag,
                            endpoint.address(),
                            attempt,
                            max
                        );
                        return ReadinessResult::Ready(endpoint);
                    }
                    log::info!(
                        "{}Registered but {} is not reachable yet (attempt {}/{})",
                        tag,
                        endpoint.address(),
                        attempt,
                        max
                    );
                }
                None => {
                    log::info!(
                        "{}Service not available yet (attempt {}/{})",
                        tag,
                        attempt,
                        max
                    );
                }
            }

            (self.sleep)(self.policy.interval);
        }

        log::error!(
            "{}Service did not become ready after {} attempts",
            tag,
            max
        );
        ReadinessResult::TimedOut
    }
}

/// Wait for an unnamed service using the given probe and connect-check
pub fn wait_for_service<P, C>(
    probe: P,
    connect_check: C,
    policy: &RetryPolicy,
) -> ReadinessResult
where
    P: FnMut() -> Option<ServiceEndpoint>,
    C: FnMut(&ServiceEndpoint) -> bool,
{
    ReadinessGate::new("", policy.clone()).wait(probe, connect_check)
}
