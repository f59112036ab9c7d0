//! Client and server identity resolution.
//!
//! # Responsibilities
//! - Determine the "real" client address for a request
//! - Honor `X-Forwarded-For` set by a fronting proxy
//! - Describe the server's own hostname and interface address
//!
//! # Design Decisions
//! - The first comma-separated `X-Forwarded-For` token is taken as the
//!   original client, per forwarding convention
//! - The header is trusted unconditionally; there is no allowlist of
//!   upstream proxies, so any client can spoof its address here. Kept
//!   as-is for parity with the original service (see DESIGN.md)
//! - Server identity is resolved once at startup and shared immutably

use std::net::{IpAddr, SocketAddr, UdpSocket};

use axum::http::HeaderMap;

use crate::net::classifier;

/// Header consulted for the forwarded client address.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolve the client address for a request.
///
/// Defaults to the transport-layer peer; an `X-Forwarded-For` header
/// overrides it with the first hop in the chain.
pub fn resolve_client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

/// The server's own network identity, reported by the network endpoints.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    pub hostname: String,
    pub ip: String,
    pub is_private: bool,
}

impl ServerIdentity {
    /// Detect hostname and interface address at startup.
    ///
    /// The interface address is discovered by the outbound-route trick (a
    /// connected UDP socket reveals which local address the kernel would
    /// use); nothing is sent. Falls back to the bound listener address.
    pub fn detect(bound: SocketAddr) -> Self {
        let ip = outbound_interface_ip()
            .unwrap_or_else(|| bound.ip())
            .to_string();
        let is_private = classifier::is_private(&ip);
        Self {
            hostname: detect_hostname(),
            ip,
            is_private,
        }
    }
}

fn outbound_interface_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

fn detect_hostname() -> String {
    if let Ok(name) = std::env::var("HOSTNAME") {
        if !name.trim().is_empty() {
            return name.trim().to_string();
        }
    }
    if let Ok(name) = std::fs::read_to_string("/etc/hostname") {
        if !name.trim().is_empty() {
            return name.trim().to_string();
        }
    }
    "localhost".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "192.168.1.50:54321".parse().unwrap()
    }

    #[test]
    fn defaults_to_peer_address() {
        let headers = HeaderMap::new();
        assert_eq!(resolve_client_ip(&headers, peer()), "192.168.1.50");
    }

    #[test]
    fn forwarded_for_takes_first_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.5, 10.0.0.1"),
        );
        assert_eq!(resolve_client_ip(&headers, peer()), "203.0.113.5");
    }

    #[test]
    fn forwarded_for_is_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static("  198.51.100.7 ,10.0.0.1"),
        );
        assert_eq!(resolve_client_ip(&headers, peer()), "198.51.100.7");
    }

    #[test]
    fn empty_forwarded_for_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static(""));
        assert_eq!(resolve_client_ip(&headers, peer()), "192.168.1.50");
    }

    #[test]
    fn detect_reports_the_bound_address_at_minimum() {
        let identity = ServerIdentity::detect("127.0.0.1:8080".parse().unwrap());
        assert!(!identity.hostname.is_empty());
        assert!(!identity.ip.is_empty());
    }
}
