//! Wire types for the external lookup services.

use serde::{Deserialize, Serialize};

/// Geographic/ISP metadata for a client address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub isp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Location {
    /// Sentinel returned when enrichment is skipped or fails.
    pub fn local_network() -> Self {
        Self {
            country: "Local Network".to_string(),
            city: "Local Network".to_string(),
            isp: "Local Network".to_string(),
            region: None,
            timezone: None,
        }
    }
}

/// Response shape of the echo-my-IP service.
#[derive(Debug, Deserialize)]
pub struct EchoIpResponse {
    pub ip: String,
}

/// Response shape of the IP-geolocation service.
///
/// Field names follow ip-api.com; the service reports `"status":
/// "success"` explicitly, everything else carries a `message`.
#[derive(Debug, Deserialize)]
pub struct GeoApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default, rename = "regionName")]
    pub region_name: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}
