use crate::figure::layout::{self, AxisSpec, LegendSpec};
use crate::figure::series::{
    LineStyle, SeriesTrace, ACTIVE_COLOR, ACTIVE_TRACE_NAME, INSTANTANEOUS_COLOR,
    INSTANTANEOUS_TRACE_NAME, REACTIVE_COLOR, REACTIVE_TRACE_NAME,
};
use crate::power::annotations::{annotate, Annotation};
use crate::power::waveform::compute_waveform;
use crate::prelude::WaveformParameters;
use serde::{Deserialize, Serialize};

/// Complete chart description handed to UI hosts: the shared time axis,
/// the three styled traces, the annotation list, and the fixed layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureModel {
    pub time: Vec<f64>,
    pub traces: Vec<SeriesTrace>,
    pub annotations: Vec<Annotation>,
    pub time_axis: AxisSpec,
    pub power_axis: AxisSpec,
    pub legend: LegendSpec,
}

impl FigureModel {
    pub fn trace(&self, name: &str) -> Option<&SeriesTrace> {
        self.traces.iter().find(|trace| trace.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The one pure entry point: compute the series, derive the annotations,
/// assemble the figure description.
pub fn render(params: &WaveformParameters) -> FigureModel {
    let waveform = compute_waveform(params);
    let annotations = annotate(params, &waveform);

    let traces = vec![
        SeriesTrace::new(
            ACTIVE_TRACE_NAME,
            LineStyle::DashDot,
            ACTIVE_COLOR,
            waveform.active.to_vec(),
        ),
        SeriesTrace::new(
            REACTIVE_TRACE_NAME,
            LineStyle::Dash,
            REACTIVE_COLOR,
            waveform.reactive.to_vec(),
        ),
        SeriesTrace::new(
            INSTANTANEOUS_TRACE_NAME,
            LineStyle::Solid,
            INSTANTANEOUS_COLOR,
            waveform.instantaneous.to_vec(),
        ),
    ];

    FigureModel {
        time: waveform.time.to_vec(),
        traces,
        annotations,
        time_axis: layout::time_axis(),
        power_axis: layout::power_axis(),
        legend: layout::legend(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::layout::{LegendAnchor, LegendOrientation, POWER_AXIS_RANGE};
    use crate::power::waveform::SAMPLE_COUNT;

    #[test]
    fn render_produces_three_styled_traces() {
        let figure = render(&WaveformParameters::default());
        assert_eq!(figure.traces.len(), 3);
        assert_eq!(figure.time.len(), SAMPLE_COUNT);

        let active = figure.trace(ACTIVE_TRACE_NAME).unwrap();
        assert_eq!(active.style, LineStyle::DashDot);
        assert_eq!(active.values.len(), SAMPLE_COUNT);

        let reactive = figure.trace(REACTIVE_TRACE_NAME).unwrap();
        assert_eq!(reactive.style, LineStyle::Dash);

        let instantaneous = figure.trace(INSTANTANEOUS_TRACE_NAME).unwrap();
        assert_eq!(instantaneous.style, LineStyle::Solid);
    }

    #[test]
    fn render_fixes_the_power_axis_and_legend() {
        let figure = render(&WaveformParameters::default());
        assert_eq!(figure.power_axis.range, Some(POWER_AXIS_RANGE));
        assert_eq!(figure.time_axis.range, None);
        assert_eq!(figure.legend.orientation, LegendOrientation::Horizontal);
        assert_eq!(figure.legend.anchor, LegendAnchor::TopRight);
    }

    #[test]
    fn instantaneous_trace_peaks_above_the_active_level() {
        let figure = render(&WaveformParameters::new(1.0, 0.0, 0.0));
        let instantaneous = figure.trace(INSTANTANEOUS_TRACE_NAME).unwrap();
        let peak = instantaneous.values.iter().cloned().fold(f64::MIN, f64::max);
        assert!((peak - 4.0).abs() < 1e-9);
    }

    #[test]
    fn figure_survives_a_json_round_trip() {
        let figure = render(&WaveformParameters::new(5.0, 90.0, 0.0));
        let json = figure.to_json().unwrap();
        let decoded: FigureModel = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.traces.len(), 3);
        assert_eq!(decoded.annotations, figure.annotations);
        assert_eq!(decoded.power_axis.range, Some(POWER_AXIS_RANGE));
    }
}
