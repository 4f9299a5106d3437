use crate::power::waveform::{
    PowerWaveform, APPARENT_POWER, VOLTAGE_AMPLITUDE, ZERO_POWER_EPSILON,
};
use crate::prelude::WaveformParameters;
use serde::{Deserialize, Serialize};

/// Plot-coordinate anchors for the generated callouts.
const SUMMARY_POSITION: (f64, f64) = (1.0, 4.5);
const CONTROLS_POSITION: (f64, f64) = (1.0, -4.5);
const ABSORBING_POSITION: (f64, f64) = (1.0, 2.0);
const GENERATING_POSITION: (f64, f64) = (1.0, -2.0);
const ZERO_POSITION: (f64, f64) = (1.0, 0.0);

/// Text callout anchored at plot coordinates. Highlighted callouts mark
/// the boundary power-transfer cases and get an arrow marker in the GUI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub position: (f64, f64),
    pub text: String,
    pub highlighted: bool,
}

impl Annotation {
    fn plain(position: (f64, f64), text: String) -> Self {
        Self {
            position,
            text,
            highlighted: false,
        }
    }

    fn highlighted(position: (f64, f64), text: String) -> Self {
        Self {
            position,
            text,
            highlighted: true,
        }
    }
}

/// Derives the annotation list for a computed waveform.
///
/// Two callouts are always present: the power summary above the plot and
/// the control-settings echo below it. At most one highlighted callout is
/// added for the boundary cases, selected from the first sample. The
/// maximum-power branches intentionally compare with exact equality, as
/// the published figure does; with the step-5 phase sliders a phase
/// difference that is a multiple of 180 degrees lands on exactly +/-1
/// after the cosine round-trip, so both branches are reachable.
pub fn annotate(params: &WaveformParameters, waveform: &PowerWaveform) -> Vec<Annotation> {
    let active = waveform.active[0];
    let reactive = waveform.reactive[0];

    let mut annotations = vec![
        Annotation::plain(
            SUMMARY_POSITION,
            format!(
                "Im = Vm = {:.0}, P: {:.2}, Q: {:.2}, S: {:.2}, P/S: {:.2}, \u{03B8}v - \u{03B8}i: {} degs",
                VOLTAGE_AMPLITUDE,
                active,
                reactive,
                APPARENT_POWER,
                active / APPARENT_POWER,
                params.phase_difference_deg(),
            ),
        ),
        Annotation::plain(
            CONTROLS_POSITION,
            format!(
                "Slider settings. Freq (Hz): {:.1}, Voltage Phase (degs): {}, Current Phase (degs): {}",
                params.frequency_hz, params.voltage_phase_deg, params.current_phase_deg,
            ),
        ),
    ];

    if active == APPARENT_POWER {
        annotations.push(Annotation::highlighted(
            ABSORBING_POSITION,
            format!("Maximum active power (absorbing): {:.0} Watts", APPARENT_POWER),
        ));
    } else if active == -APPARENT_POWER {
        annotations.push(Annotation::highlighted(
            GENERATING_POSITION,
            format!("Maximum active power (generating): {:.0} Watts", -APPARENT_POWER),
        ));
    } else if active.abs() < ZERO_POWER_EPSILON {
        annotations.push(Annotation::highlighted(
            ZERO_POSITION,
            "Zero active power".to_string(),
        ));
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::waveform::compute_waveform;

    fn annotations_for(frequency_hz: f64, voltage_phase_deg: f64, current_phase_deg: f64) -> Vec<Annotation> {
        let params = WaveformParameters::new(frequency_hz, voltage_phase_deg, current_phase_deg);
        let waveform = compute_waveform(&params);
        annotate(&params, &waveform)
    }

    #[test]
    fn summary_and_controls_callouts_are_always_present() {
        let annotations = annotations_for(2.0, 30.0, 0.0);
        assert_eq!(annotations.len(), 2);
        assert!(annotations[0].text.contains("P/S"));
        assert_eq!(annotations[0].position, (1.0, 4.5));
        assert!(annotations[1].text.starts_with("Slider settings"));
        assert_eq!(annotations[1].position, (1.0, -4.5));
        assert!(annotations.iter().all(|a| !a.highlighted));
    }

    #[test]
    fn in_phase_signals_flag_maximum_absorbed_power() {
        let annotations = annotations_for(1.0, 0.0, 0.0);
        assert_eq!(annotations.len(), 3);
        let callout = &annotations[2];
        assert!(callout.highlighted);
        assert!(callout.text.contains("absorbing"));
        assert_eq!(callout.position, (1.0, 2.0));
    }

    #[test]
    fn opposed_phases_flag_maximum_generated_power() {
        let annotations = annotations_for(1.0, 180.0, 0.0);
        let callout = annotations.last().unwrap();
        assert!(callout.highlighted);
        assert!(callout.text.contains("generating"));
        assert_eq!(callout.position, (1.0, -2.0));
    }

    #[test]
    fn quadrature_phases_flag_zero_active_power() {
        let annotations = annotations_for(5.0, 90.0, 0.0);
        let callout = annotations.last().unwrap();
        assert!(callout.highlighted);
        assert_eq!(callout.text, "Zero active power");
        assert_eq!(callout.position, (1.0, 0.0));
    }

    #[test]
    fn quadrature_split_is_flagged_at_any_frequency() {
        let slow = annotations_for(2.0, 45.0, -45.0);
        let fast = annotations_for(5.0, 90.0, 0.0);
        assert_eq!(slow.last().unwrap().text, fast.last().unwrap().text);
    }

    #[test]
    fn intermediate_phase_difference_adds_no_highlighted_callout() {
        let annotations = annotations_for(1.0, 60.0, 0.0);
        assert_eq!(annotations.len(), 2);
    }

    #[test]
    fn full_turn_phase_difference_still_counts_as_absorbing() {
        // Delta of 360 degrees reaches the exact-equality branch too.
        let annotations = annotations_for(1.0, 180.0, -180.0);
        assert!(annotations.last().unwrap().text.contains("absorbing"));
    }
}
