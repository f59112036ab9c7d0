//! Throughput derivation from byte counts and durations.

use std::time::Duration;

use serde::Serialize;

/// Megabits per second for a transfer of `size_mb` over `duration_sec`.
///
/// A zero or negative duration yields 0, never a division fault.
pub fn compute_speed(size_mb: f64, duration_sec: f64) -> f64 {
    if duration_sec <= 0.0 {
        return 0.0;
    }
    (size_mb * 8.0) / duration_sec
}

/// One measured transfer.
///
/// `cap_mbps` is the legacy simulated-mode ceiling (100 Mbps download /
/// 20 Mbps upload in the original deployment). It is presentation
/// policy: authoritative measurements must pass `None`, since clamping
/// a real measurement would falsify it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferResult {
    pub size_mb: f64,
    pub duration_sec: f64,
    pub speed_mbps: f64,
}

impl TransferResult {
    pub fn measured(size_mb: f64, duration: Duration, cap_mbps: Option<f64>) -> Self {
        let duration_sec = duration.as_secs_f64();
        let mut speed_mbps = compute_speed(size_mb, duration_sec);
        if let Some(cap) = cap_mbps {
            speed_mbps = speed_mbps.min(cap);
        }
        Self {
            size_mb,
            duration_sec,
            speed_mbps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_is_megabits_over_seconds() {
        // 10 MB over 8 s: (10 * 8) / 8 = 10 Mbps
        assert_eq!(compute_speed(10.0, 8.0), 10.0);
        assert_eq!(compute_speed(1.0, 1.0), 8.0);
    }

    #[test]
    fn zero_duration_yields_zero_not_infinity() {
        assert_eq!(compute_speed(10.0, 0.0), 0.0);
        assert_eq!(compute_speed(10.0, -1.0), 0.0);
    }

    #[test]
    fn cap_clamps_only_when_configured() {
        let fast = TransferResult::measured(100.0, Duration::from_secs(1), Some(100.0));
        assert_eq!(fast.speed_mbps, 100.0);

        let uncapped = TransferResult::measured(100.0, Duration::from_secs(1), None);
        assert_eq!(uncapped.speed_mbps, 800.0);

        let below_cap = TransferResult::measured(1.0, Duration::from_secs(1), Some(100.0));
        assert_eq!(below_cap.speed_mbps, 8.0);
    }
}
