//! Speed-test endpoint handlers.
//!
//! All endpoints answer 200 with best-effort data; enrichment or
//! classification failures degrade the payload, never the status.

use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{ConnectInfo, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::lookup::Location;
use crate::net::{classifier, resolve_client_ip};
use crate::transfer::{self, StreamDescriptor, SyntheticStream, TransferResult};

/// Unix time as fractional seconds, for client-side RTT math.
fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `GET /`: service info and route index.
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Internet speed test service",
        "routes": {
            "info": "/",
            "ping": "/api/speedtest/ping",
            "download": "/api/speedtest/download",
            "upload": "/api/speedtest/upload",
            "network": "/api/speedtest/network",
            "test": "/api/speedtest/test",
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub timestamp: f64,
}

/// `GET /api/speedtest/ping`: bare timestamp echo for RTT timing.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        timestamp: unix_timestamp(),
    })
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub size_mb: Option<u32>,
}

/// `GET /api/speedtest/download?size_mb=N`: stream exactly N MiB of
/// random data with an exact Content-Length, so the client can divide
/// bytes by elapsed time.
pub async fn download(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
    headers: HeaderMap,
) -> Response {
    let transfer = &state.config.transfer;
    let size_mb = params
        .size_mb
        .unwrap_or(transfer.default_download_mb)
        .min(transfer.max_download_mb);
    let descriptor = StreamDescriptor::from_megabytes(size_mb, transfer.chunk_bytes);

    tracing::debug!(
        request_id = headers.request_id().unwrap_or("unknown"),
        size_mb,
        total_bytes = descriptor.total_bytes,
        "Streaming synthetic download"
    );

    let body = Body::from_stream(SyntheticStream::new(descriptor));
    match Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, descriptor.total_bytes)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build download response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub size_bytes: u64,
    pub size_mb: f64,
    pub server_timestamp: f64,
    pub note: &'static str,
}

/// `POST /api/speedtest/upload`: drain and count the uploaded body.
///
/// The server deliberately reports no speed figure; only the client
/// knows when it started sending, so only its timer is authoritative.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Json<UploadResponse> {
    let summary = transfer::receive(body.into_data_stream()).await;

    // Server-observed rate, for operators only. It is a lower bound (the
    // clock includes request dispatch) and honors the legacy cap policy.
    let observed = TransferResult::measured(
        summary.size_mb(),
        summary.duration,
        state.config.transfer.upload_cap_mbps,
    );
    tracing::debug!(
        request_id = headers.request_id().unwrap_or("unknown"),
        size_bytes = summary.size_bytes,
        duration_ms = summary.duration.as_millis() as u64,
        observed_mbps = observed.speed_mbps,
        "Upload drained"
    );

    Json(UploadResponse {
        size_bytes: summary.size_bytes,
        size_mb: round2(summary.size_mb()),
        server_timestamp: unix_timestamp(),
        note: "speed is computed client-side from request duration",
    })
}

#[derive(Debug, Serialize)]
pub struct NetworkInfo {
    pub server: ServerSection,
    pub client: ClientSection,
}

#[derive(Debug, Serialize)]
pub struct ServerSection {
    pub hostname: String,
    pub ip: String,
    pub is_private: bool,
}

#[derive(Debug, Serialize)]
pub struct ClientSection {
    pub ip: String,
    pub public_ip: Option<String>,
    pub is_private: bool,
    pub location: Location,
}

async fn build_network_info(
    state: &AppState,
    headers: &HeaderMap,
    peer: SocketAddr,
) -> NetworkInfo {
    let client_ip = resolve_client_ip(headers, peer);
    let client_is_private = classifier::is_private(&client_ip);
    let enrichment = state.enricher.enrich(&client_ip, client_is_private).await;

    NetworkInfo {
        server: ServerSection {
            hostname: state.identity.hostname.clone(),
            ip: state.identity.ip.clone(),
            is_private: state.identity.is_private,
        },
        client: ClientSection {
            ip: client_ip,
            public_ip: enrichment.public_ip.map(|ip| ip.to_string()),
            is_private: client_is_private,
            location: enrichment.location,
        },
    }
}

/// `GET /api/speedtest/network`: server/client identity plus
/// best-effort geolocation.
pub async fn network_info(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<NetworkInfo> {
    Json(build_network_info(&state, &headers, peer).await)
}

#[derive(Debug, Serialize)]
pub struct TestGuide {
    pub network: NetworkInfo,
    pub instructions: TestInstructions,
}

#[derive(Debug, Serialize)]
pub struct TestInstructions {
    pub ping: &'static str,
    pub download: &'static str,
    pub upload: &'static str,
    pub formula: &'static str,
}

/// `GET /api/speedtest/test`: network info plus instructions for a
/// client-driven measurement run.
pub async fn test_guide(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<TestGuide> {
    let network = build_network_info(&state, &headers, peer).await;
    Json(TestGuide {
        network,
        instructions: TestInstructions {
            ping: "GET /api/speedtest/ping several times; round-trip time is \
                   the elapsed time between request and response",
            download: "GET /api/speedtest/download?size_mb=N and time the full \
                       body read; Content-Length is exact",
            upload: "POST random bytes to /api/speedtest/upload and time the \
                     request; the response confirms the byte count received",
            formula: "speed_mbps = (megabytes * 8) / seconds",
        },
    })
}
