use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Counters for the compute path, shared between bridge handlers.
pub struct ComputeMetrics {
    inner: Mutex<Counters>,
}

#[derive(Default)]
struct Counters {
    computations: usize,
    rejected: usize,
    last_power_factor: Option<f64>,
}

/// Serializable view of the counters, served over the bridge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub computations: usize,
    pub rejected: usize,
    pub last_power_factor: Option<f64>,
}

impl ComputeMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters::default()),
        }
    }

    pub fn record_computation(&self, power_factor: f64) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.computations += 1;
            counters.last_power_factor = Some(power_factor);
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.rejected += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(counters) = self.inner.lock() {
            MetricsSnapshot {
                computations: counters.computations,
                rejected: counters.rejected,
                last_power_factor: counters.last_power_factor,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for ComputeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_computations() {
        let metrics = ComputeMetrics::new();
        metrics.record_computation(1.0);
        metrics.record_computation(0.5);
        metrics.record_rejected();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.computations, 2);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(snapshot.last_power_factor, Some(0.5));
    }
}
