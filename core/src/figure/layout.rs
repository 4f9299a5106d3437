use serde::{Deserialize, Serialize};

pub const TIME_AXIS_TITLE: &str = "Time (sec)";
pub const POWER_AXIS_TITLE: &str = "Power (volts\u{00B7}amps)";

/// Fixed drawing range of the power axis. Series values outside it are
/// clipped by the renderer only, never numerically.
pub const POWER_AXIS_RANGE: [f64; 2] = [-5.0, 5.0];

/// Axis description: title plus an optional fixed range. Without a range
/// the renderer fits the axis to the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisSpec {
    pub title: String,
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendAnchor {
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendSpec {
    pub orientation: LegendOrientation,
    pub anchor: LegendAnchor,
}

pub fn time_axis() -> AxisSpec {
    AxisSpec {
        title: TIME_AXIS_TITLE.to_string(),
        range: None,
    }
}

pub fn power_axis() -> AxisSpec {
    AxisSpec {
        title: POWER_AXIS_TITLE.to_string(),
        range: Some(POWER_AXIS_RANGE),
    }
}

pub fn legend() -> LegendSpec {
    LegendSpec {
        orientation: LegendOrientation::Horizontal,
        anchor: LegendAnchor::TopRight,
    }
}
