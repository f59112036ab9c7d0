//! Upload draining and accounting.
//!
//! # Responsibilities
//! - Read an inbound byte stream to completion
//! - Count bytes and elapsed wall-clock time
//! - Never buffer the full payload
//!
//! # Design Decisions
//! - Content is counted, not inspected or validated
//! - A mid-stream error ends the count at whatever arrived; a missing
//!   body simply reports zero bytes. Neither is an error class
//! - The upper size bound is deployment policy (request body limit at
//!   the HTTP layer), not enforced here

use std::time::{Duration, Instant};

use futures_util::{Stream, StreamExt};

/// Byte count and elapsed time for one drained upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadSummary {
    pub size_bytes: u64,
    pub duration: Duration,
}

impl UploadSummary {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Drain `stream` to exhaustion, counting bytes.
///
/// The clock starts before the first read and stops when the stream
/// ends. Chunks arrive in whatever bounded sizes the transport delivers.
pub async fn receive<S, B, E>(mut stream: S) -> UploadSummary
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let mut size_bytes: u64 = 0;

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(data) => size_bytes += data.as_ref().len() as u64,
            Err(e) => {
                tracing::warn!(error = %e, received = size_bytes, "upload stream ended early");
                break;
            }
        }
    }

    UploadSummary {
        size_bytes,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use futures_util::stream;

    #[tokio::test]
    async fn counts_every_byte() {
        // 20 chunks of 256 KiB = 5,242,880 bytes
        let chunks: Vec<Result<Vec<u8>, Infallible>> =
            (0..20).map(|_| Ok(vec![0u8; 256 * 1024])).collect();
        let summary = receive(stream::iter(chunks)).await;

        assert_eq!(summary.size_bytes, 5_242_880);
        assert!((summary.size_mb() - 5.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn empty_stream_reports_zero() {
        let summary = receive(stream::iter(
            Vec::<Result<Vec<u8>, Infallible>>::new(),
        ))
        .await;
        assert_eq!(summary.size_bytes, 0);
    }

    #[tokio::test]
    async fn error_mid_stream_keeps_the_partial_count() {
        let chunks: Vec<Result<Vec<u8>, String>> = vec![
            Ok(vec![0u8; 1024]),
            Ok(vec![0u8; 1024]),
            Err("connection reset".to_string()),
            Ok(vec![0u8; 1024]),
        ];
        let summary = receive(stream::iter(chunks)).await;
        assert_eq!(summary.size_bytes, 2048);
    }
}
