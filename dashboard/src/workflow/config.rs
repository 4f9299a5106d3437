use anyhow::Context;
use powercore::prelude::ControlSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw control values as supplied by sliders, CLI flags, or YAML files.
/// Validation against the slider contract happens in the runner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlSettings {
    pub frequency_hz: f64,
    pub voltage_phase_deg: f64,
    pub current_phase_deg: f64,
}

impl ControlSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading control settings {}", path_ref.display()))?;
        let settings: ControlSettings = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing control settings {}", path_ref.display()))?;
        Ok(settings)
    }

    pub fn from_args(frequency_hz: f64, voltage_phase_deg: f64, current_phase_deg: f64) -> Self {
        Self {
            frequency_hz,
            voltage_phase_deg,
            current_phase_deg,
        }
    }
}

impl Default for ControlSettings {
    fn default() -> Self {
        let spec = ControlSpec::default();
        Self {
            frequency_hz: spec.frequency_hz.default,
            voltage_phase_deg: spec.voltage_phase_deg.default,
            current_phase_deg: spec.current_phase_deg.default,
        }
    }
}
