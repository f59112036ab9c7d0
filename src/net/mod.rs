//! Network address subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → identity.rs (peer address, X-Forwarded-For override)
//!     → classifier.rs (private/reserved vs public)
//!     → lookup subsystem decides whether external enrichment applies
//!
//! At startup:
//!     identity.rs (hostname + outbound interface address)
//!     → shared immutably with the HTTP handlers
//! ```
//!
//! # Design Decisions
//! - Classification fails open to "public" on unparsable input
//! - Identity resolution never performs network I/O per request

pub mod classifier;
pub mod identity;

pub use identity::{resolve_client_ip, ServerIdentity, X_FORWARDED_FOR};
