use crate::math::GridHelper;
use crate::prelude::WaveformParameters;
use ndarray::Array1;
use std::f64::consts::PI;

/// Peak voltage amplitude, volts.
pub const VOLTAGE_AMPLITUDE: f64 = 2.0;
/// Peak current amplitude, amps.
pub const CURRENT_AMPLITUDE: f64 = 2.0;
/// Apparent power for peak-amplitude sinusoids, Vm * Im / 2.
pub const APPARENT_POWER: f64 = VOLTAGE_AMPLITUDE * CURRENT_AMPLITUDE / 2.0;
/// Sample count of the time axis, independent of frequency.
pub const SAMPLE_COUNT: usize = 500;
/// Time axis spans [0, TIME_SPAN_SECS], endpoints included.
pub const TIME_SPAN_SECS: f64 = 2.0;
/// Band below which the active power counts as zero.
pub const ZERO_POWER_EPSILON: f64 = 1e-5;

/// Sampled result of one computation: the shared time axis and the three
/// parallel power series.
#[derive(Debug, Clone)]
pub struct PowerWaveform {
    pub time: Array1<f64>,
    pub active: Array1<f64>,
    pub reactive: Array1<f64>,
    pub instantaneous: Array1<f64>,
}

impl PowerWaveform {
    /// Ratio of active to apparent power.
    pub fn power_factor(&self) -> f64 {
        self.active[0] / APPARENT_POWER
    }
}

/// Computes the three power series for the given parameters.
///
/// Active and reactive power are constant across the axis; the
/// instantaneous series oscillates at twice the signal frequency around
/// the active level, phase-shifted by the voltage/current phase
/// difference. Total over all finite inputs; callers validate ranges.
pub fn compute_waveform(params: &WaveformParameters) -> PowerWaveform {
    let delta_rad = params.phase_difference_deg().to_radians();
    let time = GridHelper::linspace(0.0, TIME_SPAN_SECS, SAMPLE_COUNT);

    let active = Array1::from_elem(time.len(), APPARENT_POWER * delta_rad.cos());
    let reactive = Array1::from_elem(time.len(), APPARENT_POWER * delta_rad.sin());
    let oscillation = time
        .mapv(|t| APPARENT_POWER * (4.0 * PI * params.frequency_hz * t + delta_rad).cos());
    let instantaneous = &active + &oscillation;

    PowerWaveform {
        time,
        active,
        reactive,
        instantaneous,
    }
}

/// Voltage sample v(t) = Vm cos(2*pi*f*t + theta_v).
pub fn sample_voltage(params: &WaveformParameters, t: f64) -> f64 {
    VOLTAGE_AMPLITUDE
        * (2.0 * PI * params.frequency_hz * t + params.voltage_phase_deg.to_radians()).cos()
}

/// Current sample i(t) = Im cos(2*pi*f*t + theta_i).
pub fn sample_current(params: &WaveformParameters, t: f64) -> f64 {
    CURRENT_AMPLITUDE
        * (2.0 * PI * params.frequency_hz * t + params.current_phase_deg.to_radians()).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::StatsHelper;

    fn params(frequency_hz: f64, voltage_phase_deg: f64, current_phase_deg: f64) -> WaveformParameters {
        WaveformParameters::new(frequency_hz, voltage_phase_deg, current_phase_deg)
    }

    #[test]
    fn time_axis_is_fixed_regardless_of_frequency() {
        for frequency in [1.0, 2.5, 10.0] {
            let waveform = compute_waveform(&params(frequency, 0.0, 0.0));
            assert_eq!(waveform.time.len(), SAMPLE_COUNT);
            assert_eq!(waveform.time[0], 0.0);
            assert_eq!(waveform.time[SAMPLE_COUNT - 1], TIME_SPAN_SECS);
        }
    }

    #[test]
    fn in_phase_signals_absorb_maximum_active_power() {
        let waveform = compute_waveform(&params(1.0, 0.0, 0.0));
        assert!(waveform.active.iter().all(|&p| p == APPARENT_POWER));
        assert!(waveform.reactive.iter().all(|&q| q.abs() < 1e-12));
        assert!((waveform.power_factor() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn opposed_phases_generate_maximum_active_power() {
        let waveform = compute_waveform(&params(1.0, 180.0, 0.0));
        assert!(waveform.active.iter().all(|&p| p == -APPARENT_POWER));
        assert!(waveform.reactive.iter().all(|&q| q.abs() < 1e-12));
    }

    #[test]
    fn quadrature_phases_carry_only_reactive_power() {
        let waveform = compute_waveform(&params(5.0, 90.0, 0.0));
        assert!(waveform.active.iter().all(|&p| p.abs() < ZERO_POWER_EPSILON));
        assert!(waveform
            .reactive
            .iter()
            .all(|&q| (q - APPARENT_POWER).abs() < 1e-12));
    }

    #[test]
    fn frequency_does_not_move_the_power_split() {
        let slow = compute_waveform(&params(2.0, 45.0, -45.0));
        let fast = compute_waveform(&params(5.0, 90.0, 0.0));
        assert!((slow.active[0] - fast.active[0]).abs() < 1e-12);
        assert!((slow.reactive[0] - fast.reactive[0]).abs() < 1e-12);
        assert!((slow.instantaneous[1] - fast.instantaneous[1]).abs() > 1e-6);
    }

    #[test]
    fn active_and_reactive_power_stay_on_the_apparent_circle() {
        for delta in [-180.0, -135.0, -30.0, 0.0, 45.0, 90.0, 175.0] {
            let waveform = compute_waveform(&params(1.0, delta, 0.0));
            let magnitude = waveform.active[0].powi(2) + waveform.reactive[0].powi(2);
            assert!((magnitude - APPARENT_POWER * APPARENT_POWER).abs() < 1e-9);
        }
    }

    #[test]
    fn instantaneous_power_averages_to_the_active_level() {
        let waveform = compute_waveform(&params(1.0, 60.0, 0.0));
        let samples: Vec<f64> = waveform.instantaneous.to_vec();
        let mean = StatsHelper::mean(&samples);
        // The endpoint-inclusive grid double-counts one oscillation sample,
        // so the average misses the active level by O(1/SAMPLE_COUNT).
        assert!((mean - waveform.active[0]).abs() < 0.02);
    }

    #[test]
    fn instantaneous_power_matches_voltage_current_product_for_zero_current_phase() {
        let params = params(3.0, 70.0, 0.0);
        let waveform = compute_waveform(&params);
        for (idx, &t) in waveform.time.iter().enumerate().step_by(25) {
            let product = sample_voltage(&params, t) * sample_current(&params, t);
            assert!((waveform.instantaneous[idx] - product).abs() < 1e-9);
        }
    }
}
