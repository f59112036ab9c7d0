//! External lookup subsystem (public IP echo + geolocation).
//!
//! # Data Flow
//! ```text
//! resolved client address + private/public classification
//!     → enricher.rs
//!         private client → echo-IP service (hard timeout)
//!         public address → geolocation service (hard timeout)
//!     → Enrichment { public_ip, location }
//!
//! Any failure on the way degrades to the "Local Network" sentinel;
//! nothing here can fail the parent request.
//! ```

pub mod enricher;
pub mod types;

pub use enricher::{Enricher, Enrichment, LookupError};
pub use types::Location;
