use crate::workflow::config::ControlSettings;

/// Named control settings covering the canonical teaching cases.
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub summary: &'static str,
    pub settings: ControlSettings,
}

pub fn all() -> Vec<Preset> {
    vec![
        Preset {
            name: "unity",
            summary: "Voltage and current in phase; all apparent power is absorbed.",
            settings: ControlSettings::from_args(1.0, 0.0, 0.0),
        },
        Preset {
            name: "generating",
            summary: "Voltage opposed to current; the load returns maximum power.",
            settings: ControlSettings::from_args(1.0, 180.0, 0.0),
        },
        Preset {
            name: "quadrature",
            summary: "Voltage leads current by 90 degrees; purely reactive transfer.",
            settings: ControlSettings::from_args(5.0, 90.0, 0.0),
        },
        Preset {
            name: "lagging",
            summary: "Same quadrature split reached from symmetric phases, slower sweep.",
            settings: ControlSettings::from_args(2.0, 45.0, -45.0),
        },
    ]
}

pub fn find(name: &str) -> Option<Preset> {
    all()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive() {
        let preset = find("Unity").unwrap();
        assert_eq!(preset.settings, ControlSettings::from_args(1.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_names_yield_none() {
        assert!(find("three-phase").is_none());
    }

    #[test]
    fn quadrature_presets_share_the_same_phase_difference() {
        let quadrature = find("quadrature").unwrap().settings;
        let lagging = find("lagging").unwrap().settings;
        assert_eq!(
            quadrature.voltage_phase_deg - quadrature.current_phase_deg,
            lagging.voltage_phase_deg - lagging.current_phase_deg
        );
    }
}
