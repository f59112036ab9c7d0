//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! server. All types derive Serde traits for deserialization from config
//! files, and every field has a default so a minimal config works.

use serde::{Deserialize, Serialize};

/// Root configuration for the speed-test server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// External lookup services (echo-IP, geolocation).
    pub lookup: LookupConfig,

    /// Download/upload transfer tuning.
    pub transfer: TransferConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request deadline in seconds. Generous, since a slow link
    /// legitimately spends minutes inside one transfer request.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 300 }
    }
}

/// External lookup service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Enable external lookups. When disabled, network info degrades to
    /// the "Local Network" sentinel without any outbound calls.
    pub enabled: bool,

    /// Echo-my-IP service returning `{"ip": "..."}`.
    pub echo_ip_url: String,

    /// IP-geolocation service; the target address is appended as a path
    /// segment.
    pub geo_url: String,

    /// Hard per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            echo_ip_url: "https://api.ipify.org?format=json".to_string(),
            geo_url: "http://ip-api.com/json".to_string(),
            timeout_secs: 2,
        }
    }
}

/// Transfer tuning for the speed-test endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Chunk granularity for the synthetic download stream, in bytes.
    pub chunk_bytes: u32,

    /// Download size when the client does not ask for one, in MiB.
    pub default_download_mb: u32,

    /// Ceiling for client-requested download sizes, in MiB. Requests
    /// beyond it are clamped, not rejected.
    pub max_download_mb: u32,

    /// Legacy simulated-mode ceiling for reported download speed, in
    /// Mbps. Leave unset for real measurements; clamping falsifies them.
    pub download_cap_mbps: Option<f64>,

    /// Legacy simulated-mode ceiling for reported upload speed, in Mbps.
    pub upload_cap_mbps: Option<f64>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            chunk_bytes: 256 * 1024,
            default_download_mb: 10,
            max_download_mb: 1024,
            download_cap_mbps: None,
            upload_cap_mbps: None,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted upload body in bytes (deployment policy; the
    /// upload receiver itself has no bound).
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 1024 * 1024 * 1024, // 1 GiB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
