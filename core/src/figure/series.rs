use serde::{Deserialize, Serialize};

pub const ACTIVE_TRACE_NAME: &str = "Active Power (P)";
pub const REACTIVE_TRACE_NAME: &str = "Reactive Power (Q)";
pub const INSTANTANEOUS_TRACE_NAME: &str = "Instantaneous Power (p)";

pub const ACTIVE_COLOR: [f32; 3] = [0.0, 0.0, 1.0];
// Firebrick.
pub const REACTIVE_COLOR: [f32; 3] = [0.698, 0.133, 0.133];
pub const INSTANTANEOUS_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

pub const TRACE_WIDTH: f32 = 2.0;

/// Stroke pattern for a rendered line series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dash,
    DashDot,
}

/// One plotted line: per-sample values over the shared time axis plus the
/// stroke styling the host should draw it with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesTrace {
    pub name: String,
    pub style: LineStyle,
    pub color: [f32; 3],
    pub width: f32,
    pub values: Vec<f64>,
}

impl SeriesTrace {
    pub fn new(name: &str, style: LineStyle, color: [f32; 3], values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            style,
            color,
            width: TRACE_WIDTH,
            values,
        }
    }
}
