//! Synthetic payload generation for download tests.
//!
//! # Responsibilities
//! - Produce an exact number of random bytes as a lazy chunk sequence
//! - Keep memory bounded to one in-flight chunk
//! - Stop generating when the consumer goes away
//!
//! # Design Decisions
//! - Chunks are filled from a CSPRNG-seeded generator so the payload is
//!   not trivially compressible; a compressing middlebox would otherwise
//!   inflate measured throughput
//! - The stream is single-pass and finite; the transport declares
//!   Content-Length up front from the descriptor
//! - Dropping the stream (client disconnect) abandons generation

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Bytes;
use futures_util::Stream;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Default chunk size, 256 KiB.
pub const DEFAULT_CHUNK_BYTES: u32 = 256 * 1024;

/// Shape of a synthetic download: exact total and chunking granularity.
///
/// Invariant: the emitted chunk lengths sum to exactly `total_bytes`,
/// with only the final chunk truncated to the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub total_bytes: u64,
    pub chunk_bytes: u32,
}

impl StreamDescriptor {
    pub fn from_megabytes(size_mb: u32, chunk_bytes: u32) -> Self {
        Self {
            total_bytes: u64::from(size_mb) * 1024 * 1024,
            chunk_bytes,
        }
    }
}

/// Lazy sequence of random byte chunks matching a [`StreamDescriptor`].
pub struct SyntheticStream {
    remaining: u64,
    chunk_bytes: usize,
    rng: StdRng,
}

impl SyntheticStream {
    pub fn new(descriptor: StreamDescriptor) -> Self {
        Self {
            remaining: descriptor.total_bytes,
            // A zero chunk size would never make progress; config
            // validation rejects it, this is the backstop.
            chunk_bytes: descriptor.chunk_bytes.max(1) as usize,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Stream for SyntheticStream {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(None);
        }

        let len = (this.chunk_bytes as u64).min(this.remaining) as usize;
        let mut chunk = vec![0u8; len];
        this.rng.fill_bytes(&mut chunk);
        this.remaining -= len as u64;

        Poll::Ready(Some(Ok(Bytes::from(chunk))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let chunks = self.remaining.div_ceil(self.chunk_bytes as u64) as usize;
        (chunks, Some(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    async fn collect_lengths(descriptor: StreamDescriptor) -> Vec<usize> {
        let mut stream = SyntheticStream::new(descriptor);
        let mut lengths = Vec::new();
        while let Some(chunk) = stream.next().await {
            lengths.push(chunk.unwrap().len());
        }
        lengths
    }

    #[tokio::test]
    async fn chunk_lengths_sum_to_exact_total() {
        for size_mb in [0u32, 1, 10, 100] {
            let descriptor = StreamDescriptor::from_megabytes(size_mb, DEFAULT_CHUNK_BYTES);
            let lengths = collect_lengths(descriptor).await;
            let total: u64 = lengths.iter().map(|&l| l as u64).sum();
            assert_eq!(total, u64::from(size_mb) * 1024 * 1024);
        }
    }

    #[tokio::test]
    async fn only_the_final_chunk_is_short() {
        let descriptor = StreamDescriptor {
            total_bytes: 1024 * 1024 + 100,
            chunk_bytes: DEFAULT_CHUNK_BYTES,
        };
        let lengths = collect_lengths(descriptor).await;
        assert_eq!(lengths.len(), 5);
        for &len in &lengths[..lengths.len() - 1] {
            assert_eq!(len, DEFAULT_CHUNK_BYTES as usize);
        }
        assert_eq!(*lengths.last().unwrap(), 100);
    }

    #[tokio::test]
    async fn zero_total_yields_no_chunks() {
        let descriptor = StreamDescriptor::from_megabytes(0, DEFAULT_CHUNK_BYTES);
        assert!(collect_lengths(descriptor).await.is_empty());
    }

    #[tokio::test]
    async fn payload_is_not_trivially_compressible() {
        let descriptor = StreamDescriptor {
            total_bytes: 64 * 1024,
            chunk_bytes: 64 * 1024,
        };
        let mut stream = SyntheticStream::new(descriptor);
        let chunk = stream.next().await.unwrap().unwrap();

        // A CSPRNG chunk has near-uniform byte frequencies; a constant
        // or repeating payload would concentrate mass on a few values.
        let mut counts = [0u32; 256];
        for &b in chunk.iter() {
            counts[b as usize] += 1;
        }
        let max = counts.iter().max().copied().unwrap_or(0);
        assert!(max < chunk.len() as u32 / 64);
    }
}
