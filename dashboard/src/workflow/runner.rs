use crate::workflow::config::ControlSettings;
use anyhow::Context;
use powercore::figure::series::{ACTIVE_TRACE_NAME, INSTANTANEOUS_TRACE_NAME};
use powercore::figure::{self, FigureModel};
use powercore::math::StatsHelper;
use powercore::power::waveform::APPARENT_POWER;
use powercore::prelude::ControlSpec;
use powercore::telemetry::{ActivityLog, ComputeMetrics, MetricsSnapshot};
use std::sync::Arc;

#[derive(Debug)]
pub struct RenderOutcome {
    pub figure: FigureModel,
    pub power_factor: f64,
    pub phase_difference_deg: f64,
}

/// Orchestrates one render pass: validate the raw settings, invoke the
/// core, record telemetry.
#[derive(Clone)]
pub struct Runner {
    bounds: ControlSpec,
    metrics: Arc<ComputeMetrics>,
    activity: Arc<ActivityLog>,
}

impl Runner {
    pub fn new() -> Self {
        Self {
            bounds: ControlSpec::default(),
            metrics: Arc::new(ComputeMetrics::new()),
            activity: Arc::new(ActivityLog::new()),
        }
    }

    pub fn execute(&self, settings: &ControlSettings) -> anyhow::Result<RenderOutcome> {
        let params = match self.bounds.validate(
            settings.frequency_hz,
            settings.voltage_phase_deg,
            settings.current_phase_deg,
        ) {
            Ok(params) => params,
            Err(err) => {
                self.metrics.record_rejected();
                return Err(err).context("validating control settings");
            }
        };

        let figure = figure::render(&params);
        let instantaneous = figure
            .trace(INSTANTANEOUS_TRACE_NAME)
            .map(|trace| trace.values.as_slice())
            .unwrap_or(&[]);
        let mean = StatsHelper::mean(instantaneous);
        let rms = StatsHelper::rms(instantaneous);

        let active = figure
            .trace(ACTIVE_TRACE_NAME)
            .and_then(|trace| trace.values.first().copied())
            .unwrap_or_default();
        let power_factor = active / APPARENT_POWER;

        self.metrics.record_computation(power_factor);
        self.activity.record(&format!(
            "Rendered figure: phase delta {} degs, instantaneous mean {:.3}, RMS {:.3}",
            params.phase_difference_deg(),
            mean,
            rms
        ));

        Ok(RenderOutcome {
            figure,
            power_factor,
            phase_difference_deg: params.phase_difference_deg(),
        })
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn activity(&self) -> Vec<String> {
        self.activity.recent()
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_renders_the_unity_case() {
        let runner = Runner::new();
        let outcome = runner
            .execute(&ControlSettings::from_args(1.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(outcome.figure.traces.len(), 3);
        assert!((outcome.power_factor - 1.0).abs() < 1e-12);
        assert_eq!(outcome.phase_difference_deg, 0.0);
        assert_eq!(runner.metrics_snapshot().computations, 1);
        assert_eq!(runner.activity().len(), 1);
    }

    #[test]
    fn runner_rejects_out_of_range_settings() {
        let runner = Runner::new();
        let err = runner
            .execute(&ControlSettings::from_args(0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(err.to_string().contains("validating control settings"));
        let snapshot = runner.metrics_snapshot();
        assert_eq!(snapshot.computations, 0);
        assert_eq!(snapshot.rejected, 1);
    }

    #[test]
    fn shared_telemetry_survives_cloning() {
        let runner = Runner::new();
        let clone = runner.clone();
        clone
            .execute(&ControlSettings::from_args(5.0, 90.0, 0.0))
            .unwrap();
        assert_eq!(runner.metrics_snapshot().computations, 1);
    }
}
