//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, chunk size sane)
//! - Check the lookup service URLs actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ServerConfig;

/// Largest permitted chunk size for the synthetic stream (8 MiB).
const MAX_CHUNK_BYTES: u32 = 8 * 1024 * 1024;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &'static str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field,
        message: message.into(),
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(err(
            "listener.bind_address",
            format!("not a socket address: {:?}", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(err("timeouts.request_secs", "must be at least 1"));
    }

    if config.transfer.chunk_bytes == 0 {
        errors.push(err("transfer.chunk_bytes", "must be at least 1"));
    } else if config.transfer.chunk_bytes > MAX_CHUNK_BYTES {
        errors.push(err(
            "transfer.chunk_bytes",
            format!("must be at most {} bytes", MAX_CHUNK_BYTES),
        ));
    }

    if config.transfer.default_download_mb > config.transfer.max_download_mb {
        errors.push(err(
            "transfer.default_download_mb",
            "exceeds transfer.max_download_mb",
        ));
    }

    for (field, cap) in [
        ("transfer.download_cap_mbps", config.transfer.download_cap_mbps),
        ("transfer.upload_cap_mbps", config.transfer.upload_cap_mbps),
    ] {
        if let Some(cap) = cap {
            if !cap.is_finite() || cap <= 0.0 {
                errors.push(err(field, "must be a positive number"));
            }
        }
    }

    if config.lookup.enabled {
        if config.lookup.timeout_secs == 0 {
            errors.push(err("lookup.timeout_secs", "must be at least 1"));
        }
        for (field, value) in [
            ("lookup.echo_ip_url", &config.lookup.echo_ip_url),
            ("lookup.geo_url", &config.lookup.geo_url),
        ] {
            if Url::parse(value).is_err() {
                errors.push(err(field, format!("not a valid URL: {:?}", value)));
            }
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(err(
            "observability.metrics_address",
            format!(
                "not a socket address: {:?}",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
