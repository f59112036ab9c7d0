//! Data transfer subsystem.
//!
//! # Data Flow
//! ```text
//! Download request
//!     → stream.rs (StreamDescriptor → SyntheticStream)
//!     → transport writes chunks, Content-Length declared up front
//!
//! Upload request
//!     → receiver.rs (drain body, count bytes + elapsed time)
//!     → throughput.rs if a server-side figure is wanted
//! ```
//!
//! # Design Decisions
//! - Generation and draining both yield per chunk, so one large transfer
//!   never blocks other connections
//! - Server-side speed math lives in throughput.rs; the authoritative
//!   endpoints leave the computation to the client's own timers

pub mod receiver;
pub mod stream;
pub mod throughput;

pub use receiver::{receive, UploadSummary};
pub use stream::{StreamDescriptor, SyntheticStream, DEFAULT_CHUNK_BYTES};
pub use throughput::{compute_speed, TransferResult};
