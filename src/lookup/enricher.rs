//! Best-effort geolocation enrichment.
//!
//! # Responsibilities
//! - Discover the public-facing address of a privately-addressed client
//!   via an echo-my-IP service
//! - Query an IP-geolocation service for location/ISP metadata
//! - Degrade to the "Local Network" sentinel on any failure
//!
//! # Design Decisions
//! - Each external call carries a hard timeout (default 2s); no retries,
//!   a slow lookup must never delay the response
//! - The fallible steps return `Result<_, LookupError>`; `enrich` is the
//!   single place the "use default" decision is made, so the fallback is
//!   visible in code rather than hidden in a blanket catch
//! - Failures are logged at `warn` and never surface to the HTTP caller

use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

use crate::config::LookupConfig;
use crate::lookup::types::{EchoIpResponse, GeoApiResponse, Location};
use crate::net::classifier;

/// Failure modes of the external lookup services.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup response malformed: {0}")]
    Malformed(String),

    #[error("lookup service reported failure: {0}")]
    ServiceStatus(String),
}

/// Result of enriching one client address.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub public_ip: Option<IpAddr>,
    pub location: Location,
}

/// Client for the echo-IP and geolocation services.
pub struct Enricher {
    client: reqwest::Client,
    config: LookupConfig,
    timeout: Duration,
}

impl Enricher {
    pub fn new(config: LookupConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self {
            client: reqwest::Client::new(),
            config,
            timeout,
        }
    }

    /// Ask the echo-IP service what address our traffic appears from.
    pub async fn discover_public_ip(&self) -> Result<IpAddr, LookupError> {
        let response = self
            .client
            .get(&self.config.echo_ip_url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<EchoIpResponse>()
            .await?;

        response
            .ip
            .parse::<IpAddr>()
            .map_err(|_| LookupError::Malformed(format!("not an IP literal: {:?}", response.ip)))
    }

    /// Query the geolocation service for a public address.
    ///
    /// Only an explicit success status is accepted; anything else is an
    /// error for the caller to degrade on.
    pub async fn geolocate(&self, ip: IpAddr) -> Result<Location, LookupError> {
        let url = format!("{}/{}", self.config.geo_url.trim_end_matches('/'), ip);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<GeoApiResponse>()
            .await?;

        if response.status != "success" {
            return Err(LookupError::ServiceStatus(
                response.message.unwrap_or(response.status),
            ));
        }

        let unknown = || "Unknown".to_string();
        Ok(Location {
            country: response.country.unwrap_or_else(unknown),
            city: response.city.unwrap_or_else(unknown),
            isp: response.isp.unwrap_or_else(unknown),
            region: response.region_name,
            timezone: response.timezone,
        })
    }

    /// Enrich a resolved client address, best-effort.
    ///
    /// Private client → discover the public address first; failure leaves
    /// `public_ip` empty and skips geolocation. Geolocation runs only for
    /// a usable public address and degrades to the sentinel on failure.
    pub async fn enrich(&self, client_ip: &str, client_is_private: bool) -> Enrichment {
        if !self.config.enabled {
            let public_ip = client_ip
                .parse::<IpAddr>()
                .ok()
                .filter(|ip| !classifier::is_private_ip(ip));
            return Enrichment {
                public_ip,
                location: Location::local_network(),
            };
        }

        let public_ip = if client_is_private {
            match self.discover_public_ip().await {
                Ok(ip) => Some(ip),
                Err(e) => {
                    tracing::warn!(error = %e, "public IP discovery failed");
                    None
                }
            }
        } else {
            client_ip.parse::<IpAddr>().ok()
        };

        let location = match public_ip {
            Some(ip) if !classifier::is_private_ip(&ip) => match self.geolocate(ip).await {
                Ok(location) => location,
                Err(e) => {
                    tracing::warn!(ip = %ip, error = %e, "geolocation failed");
                    Location::local_network()
                }
            },
            _ => Location::local_network(),
        };

        Enrichment {
            public_ip,
            location,
        }
    }
}
