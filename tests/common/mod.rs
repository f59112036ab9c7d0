//! Shared utilities for integration testing.

use std::net::SocketAddr;

use speedtest_server::{HttpServer, ServerConfig, ServerIdentity, Shutdown};

/// Config suitable for tests: external lookups off, metrics off.
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.lookup.enabled = false;
    config.observability.metrics_enabled = false;
    config
}

/// Boot the real server on an ephemeral loopback port.
///
/// Returns the bound address and the shutdown handle; triggering it
/// stops the server.
pub async fn spawn_server(mut config: ServerConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, ServerIdentity::detect(addr));

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// An address nothing listens on; connections are refused immediately.
#[allow(dead_code)]
pub fn unreachable_url(path: &str) -> String {
    format!("http://127.0.0.1:1{}", path)
}
