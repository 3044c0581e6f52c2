//! TCP reachability check

use super::readiness::ServiceEndpoint;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Time budget for one connect-check
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Returns true if a TCP connection to the endpoint can be opened.
///
/// Resolved addresses are tried in turn and share a single `timeout` budget,
/// which starts before name resolution. The connection is dropped immediately
/// on success.
pub fn tcp_reachable(endpoint: &ServiceEndpoint, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    let addrs = match (endpoint.host.as_str(), endpoint.port).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            log::debug!("Failed to resolve {}: {}", endpoint.address(), e);
            return false;
        }
    };

    for addr in addrs {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            log::debug!("Connect budget for {} exhausted", endpoint.address());
            return false;
        }
        match TcpStream::connect_timeout(&addr, remaining) {
            Ok(_) => return true,
            Err(e) => log::debug!("Connect to {} failed: {}", addr, e),
        }
    }

    false
}
