//! HTTP Speed-Test Server
//!
//! Measures network throughput and latency between a client and this
//! server, and reports client-side network/geolocation metadata.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                SPEED-TEST SERVER             │
//!                        │                                              │
//!   Client Request       │  ┌─────────┐   ┌──────────┐   ┌──────────┐  │
//!   ─────────────────────┼─▶│  http   │──▶│ handlers │──▶│ transfer │  │
//!                        │  │ server  │   │          │   │ stream / │  │
//!                        │  └─────────┘   └────┬─────┘   │ receiver │  │
//!                        │                     │         └──────────┘  │
//!                        │                     ▼                       │
//!                        │  ┌─────────┐   ┌──────────┐                 │
//!                        │  │   net   │──▶│  lookup  │──▶ echo-IP /    │
//!                        │  │ identity│   │ enricher │    geolocation  │
//!                        │  │/classify│   └──────────┘    services     │
//!                        │  └─────────┘                                │
//!                        │                                              │
//!                        │  ┌────────────────────────────────────────┐ │
//!                        │  │          Cross-Cutting Concerns        │ │
//!                        │  │  ┌────────┐ ┌────────────┐ ┌─────────┐ │ │
//!                        │  │  │ config │ │observabili-│ │lifecycle│ │ │
//!                        │  │  │        │ │ty (metrics)│ │         │ │ │
//!                        │  │  └────────┘ └────────────┘ └─────────┘ │ │
//!                        │  └────────────────────────────────────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```
//!
//! External lookups (echo-IP, geolocation) are strictly best-effort:
//! their failure degrades the response payload, never its status.

// Core subsystems
pub mod config;
pub mod http;
pub mod lookup;
pub mod net;
pub mod transfer;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use net::ServerIdentity;
