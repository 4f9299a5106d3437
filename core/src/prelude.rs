use serde::{Deserialize, Serialize};

/// Immutable inputs for one waveform computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformParameters {
    pub frequency_hz: f64,
    pub voltage_phase_deg: f64,
    pub current_phase_deg: f64,
}

impl WaveformParameters {
    pub fn new(frequency_hz: f64, voltage_phase_deg: f64, current_phase_deg: f64) -> Self {
        Self {
            frequency_hz,
            voltage_phase_deg,
            current_phase_deg,
        }
    }

    /// Voltage phase minus current phase, in degrees.
    pub fn phase_difference_deg(&self) -> f64 {
        self.voltage_phase_deg - self.current_phase_deg
    }
}

impl Default for WaveformParameters {
    fn default() -> Self {
        let spec = ControlSpec::default();
        Self {
            frequency_hz: spec.frequency_hz.default,
            voltage_phase_deg: spec.voltage_phase_deg.default,
            current_phase_deg: spec.current_phase_deg.default,
        }
    }
}

/// Range contract for a single slider input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderSpec {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// The slider contract shared between the computation core and UI hosts.
///
/// Hosts validate against these ranges before invoking the computation;
/// the computation itself never validates. Step quantization is owned by
/// the widgets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ControlSpec {
    pub frequency_hz: SliderSpec,
    pub voltage_phase_deg: SliderSpec,
    pub current_phase_deg: SliderSpec,
}

impl ControlSpec {
    pub fn validate(
        &self,
        frequency_hz: f64,
        voltage_phase_deg: f64,
        current_phase_deg: f64,
    ) -> ParameterResult<WaveformParameters> {
        check_slider("frequency_hz", &self.frequency_hz, frequency_hz)?;
        check_slider("voltage_phase_deg", &self.voltage_phase_deg, voltage_phase_deg)?;
        check_slider("current_phase_deg", &self.current_phase_deg, current_phase_deg)?;
        Ok(WaveformParameters::new(
            frequency_hz,
            voltage_phase_deg,
            current_phase_deg,
        ))
    }
}

impl Default for ControlSpec {
    fn default() -> Self {
        let phase = SliderSpec {
            min: -180.0,
            max: 180.0,
            step: 5.0,
            default: 0.0,
        };
        Self {
            frequency_hz: SliderSpec {
                min: 1.0,
                max: 10.0,
                step: 0.1,
                default: 1.0,
            },
            voltage_phase_deg: phase,
            current_phase_deg: phase,
        }
    }
}

fn check_slider(name: &'static str, spec: &SliderSpec, value: f64) -> ParameterResult<()> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { name });
    }
    if !spec.contains(value) {
        return Err(ParameterError::OutOfRange {
            name,
            value,
            min: spec.min,
            max: spec.max,
        });
    }
    Ok(())
}

/// Host-side input rejection. The computation is total and never raises.
#[derive(thiserror::Error, Debug)]
pub enum ParameterError {
    #[error("{name} is not a finite number")]
    NotFinite { name: &'static str },
    #[error("{name} {value} outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_slider_contract() {
        let params = WaveformParameters::default();
        assert_eq!(params.frequency_hz, 1.0);
        assert_eq!(params.voltage_phase_deg, 0.0);
        assert_eq!(params.current_phase_deg, 0.0);
    }

    #[test]
    fn validate_accepts_in_range_values() {
        let spec = ControlSpec::default();
        let params = spec.validate(5.0, 90.0, -45.0).unwrap();
        assert_eq!(params.phase_difference_deg(), 135.0);
    }

    #[test]
    fn validate_rejects_out_of_range_frequency() {
        let spec = ControlSpec::default();
        let err = spec.validate(0.5, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ParameterError::OutOfRange { name, .. } if name == "frequency_hz"));
    }

    #[test]
    fn validate_rejects_non_finite_phase() {
        let spec = ControlSpec::default();
        let err = spec.validate(1.0, f64::NAN, 0.0).unwrap_err();
        assert!(matches!(err, ParameterError::NotFinite { name } if name == "voltage_phase_deg"));
    }
}
