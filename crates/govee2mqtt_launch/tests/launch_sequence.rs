//! Launch sequence integration tests
//!
//! Runs the real Supervisor client and TCP connect-check against local fakes.

mod common;

use common::{closed_port, mqtt_service_body, no_service_body, FakeSupervisor};
use govee2mqtt_launch::runtime::{CONNECT_TIMEOUT, ENV_MQTT_PASSWORD, ENV_MQTT_PORT};
use govee2mqtt_launch::{
    tcp_reachable, AddonOptions, LaunchConfig, LaunchError, Launcher, RetryPolicy,
    SupervisorClient, SupervisorError,
};
use std::net::TcpListener;
use std::time::Duration;

fn fast_launcher(max_attempts: u32) -> Launcher {
    Launcher::new(LaunchConfig {
        policy: RetryPolicy {
            max_attempts,
            interval: Duration::from_millis(10),
        },
        ..Default::default()
    })
}

fn options_with_key() -> AddonOptions {
    AddonOptions::from_json(r#"{"govee_api_key": "integration-key", "poll_interval": 15}"#)
        .unwrap()
}

#[test]
fn test_service_lookup_sends_bearer_token() {
    let supervisor = FakeSupervisor::start(vec![(200, mqtt_service_body(1883))]);
    let client = SupervisorClient::new(supervisor.url(), Some("test-token".to_string())).unwrap();

    let endpoint = client.service("mqtt").unwrap();
    assert_eq!(endpoint.host, "127.0.0.1");
    assert_eq!(endpoint.port, 1883);
    assert_eq!(endpoint.username.as_deref(), Some("addons"));

    let requests = supervisor.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("get /services/mqtt "));
    assert!(requests[0].contains("authorization: bearer test-token"));
}

#[test]
fn test_service_lookup_error_status() {
    let supervisor = FakeSupervisor::start(vec![(400, no_service_body())]);
    let client = SupervisorClient::new(supervisor.url(), None).unwrap();

    let err = client.service("mqtt").unwrap_err();
    assert!(matches!(err, SupervisorError::Status { status: 400, .. }));
    assert!(client.probe("mqtt").is_none());
}

#[test]
fn test_launch_waits_until_service_registered() {
    let broker = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = broker.local_addr().unwrap().port();
    let supervisor = FakeSupervisor::start(vec![
        (400, no_service_body()),
        (400, no_service_body()),
        (200, mqtt_service_body(port)),
    ]);
    let client = SupervisorClient::new(supervisor.url(), Some("t".to_string())).unwrap();

    let plan = fast_launcher(5)
        .prepare(
            &options_with_key(),
            || client.probe("mqtt"),
            |endpoint| tcp_reachable(endpoint, CONNECT_TIMEOUT),
        )
        .unwrap();

    assert_eq!(supervisor.requests().len(), 3);
    assert_eq!(plan.endpoint.port, port);
    assert_eq!(plan.process.env.get(ENV_MQTT_PORT), Some(port.to_string().as_str()));
    assert_eq!(plan.process.env.get(ENV_MQTT_PASSWORD), Some("broker-pass"));
}

#[test]
fn test_registered_but_unreachable_broker_times_out() {
    let supervisor = FakeSupervisor::start(vec![(200, mqtt_service_body(closed_port()))]);
    let client = SupervisorClient::new(supervisor.url(), Some("t".to_string())).unwrap();

    let result = fast_launcher(3).prepare(
        &options_with_key(),
        || client.probe("mqtt"),
        |endpoint| tcp_reachable(endpoint, CONNECT_TIMEOUT),
    );

    assert!(matches!(
        result,
        Err(LaunchError::ServiceUnavailable { attempts: 3, .. })
    ));
    assert_eq!(supervisor.requests().len(), 3);
}

#[test]
fn test_missing_credential_makes_no_requests() {
    let supervisor = FakeSupervisor::start(vec![(200, mqtt_service_body(1883))]);
    let client = SupervisorClient::new(supervisor.url(), Some("t".to_string())).unwrap();

    let result = fast_launcher(3).prepare(
        &AddonOptions::default(),
        || client.probe("mqtt"),
        |endpoint| tcp_reachable(endpoint, CONNECT_TIMEOUT),
    );

    assert!(matches!(result, Err(LaunchError::MissingCredential)));
    assert!(supervisor.requests().is_empty());
}

#[cfg(unix)]
#[test]
fn test_child_receives_environment() {
    let broker = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = broker.local_addr().unwrap().port();
    let supervisor = FakeSupervisor::start(vec![(200, mqtt_service_body(port))]);
    let client = SupervisorClient::new(supervisor.url(), Some("t".to_string())).unwrap();

    let mut plan = fast_launcher(2)
        .prepare(
            &options_with_key(),
            || client.probe("mqtt"),
            |endpoint| tcp_reachable(endpoint, CONNECT_TIMEOUT),
        )
        .unwrap();

    plan.process.executable = "sh".to_string();
    plan.process.args = vec![
        "-c".to_string(),
        format!(
            "test \"$MQTT_PORT\" = {} && test \"$GOVEE_API_KEY\" = integration-key \
             && test \"$POLL_INTERVAL_SECONDS\" = 15 && test \"$LOG_LEVEL\" = info \
             && test \"$MQTT_BASE_TOPIC\" = govee2mqtt",
            port
        ),
    ];

    let status = plan.process.spawn_and_wait().unwrap();
    assert!(status.success());
}
