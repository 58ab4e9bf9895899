use crate::error::{Error, Result};
use rand::Rng;
use std::ops::Range;
use std::time::Duration;

/// Latency and transient-failure injection for the simulated backend.
///
/// Passed into each service at construction rather than read from global
/// state, so tests can pin the failure rate to 0 or 1.
#[derive(Debug, Clone)]
pub struct SimPolicy {
    latency_ms: Range<u64>,
    write_failure_rate: f64,
}

impl SimPolicy {
    pub fn new(latency_ms: Range<u64>, write_failure_rate: f64) -> Self {
        Self {
            latency_ms,
            write_failure_rate: write_failure_rate.clamp(0.0, 1.0),
        }
    }

    /// No latency, no injected failures.
    pub fn instant() -> Self {
        Self::new(0..0, 0.0)
    }

    /// Every write fails; reads still succeed. For exercising rollback.
    pub fn always_failing() -> Self {
        Self::new(0..0, 1.0)
    }

    /// Emulated network round-trip, applied to reads and writes alike.
    pub async fn latency(&self) {
        if self.latency_ms.is_empty() {
            return;
        }
        let ms = rand::thread_rng().gen_range(self.latency_ms.clone());
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Roll the per-call transient failure for a mutating operation. Always
    /// runs before any store access, so a failure leaves state untouched.
    pub fn roll_write_failure(&self) -> Result<()> {
        if self.write_failure_rate > 0.0 && rand::thread_rng().gen_bool(self.write_failure_rate) {
            tracing::warn!("injected write failure");
            return Err(Error::ServiceUnavailable);
        }
        Ok(())
    }
}

impl Default for SimPolicy {
    fn default() -> Self {
        Self::new(200..1200, 0.08)
    }
}
