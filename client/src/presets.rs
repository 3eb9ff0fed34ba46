//! Example surfaces
//!
//! Ready-made function/domain combinations for quick runs.

use crate::orchestrator::form::RawFormValues;
use std::f64::consts::PI;

/// Resolution used by every preset
pub const PRESET_RESOLUTION: u32 = 50;

/// A named example surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    /// Short identifier used on the command line
    pub name: &'static str,
    /// Human readable title
    pub title: &'static str,
    /// Function expression
    pub function: &'static str,
    /// Domain as `[a, b, c, d]`
    pub domain: [f64; 4],
}

/// All built-in presets
pub const PRESETS: [Preset; 4] = [
    Preset {
        name: "paraboloid",
        title: "Paraboloid",
        function: "x**2 + y**2",
        domain: [-2.0, 2.0, -2.0, 2.0],
    },
    Preset {
        name: "gaussian",
        title: "Gaussian bell",
        function: "exp(-(x**2 + y**2))",
        domain: [-2.0, 2.0, -2.0, 2.0],
    },
    Preset {
        name: "waves",
        title: "Sine waves",
        function: "sin(x) * cos(y)",
        domain: [0.0, 2.0 * PI, 0.0, 2.0 * PI],
    },
    Preset {
        name: "saddle",
        title: "Saddle",
        function: "x**2 - y**2",
        domain: [-2.0, 2.0, -2.0, 2.0],
    },
];

/// Look a preset up by name (case insensitive)
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
}

impl Preset {
    /// Form values as if the user had typed the preset in
    pub fn form_values(&self) -> RawFormValues {
        let [a, b, c, d] = self.domain;
        RawFormValues {
            function: self.function.to_string(),
            a: a.to_string(),
            b: b.to_string(),
            c: c.to_string(),
            d: d.to_string(),
            resolution: PRESET_RESOLUTION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset() {
        assert_eq!(find("Saddle").map(|p| p.function), Some("x**2 - y**2"));
        assert!(find("torus").is_none());
    }

    #[test]
    fn test_form_values_round_trip_domain() {
        for preset in &PRESETS {
            let request = preset.form_values().to_request();
            assert_eq!([request.a, request.b, request.c, request.d], preset.domain);
            assert_eq!(request.resolution, Some(50));
            assert!(request.validate().is_ok(), "{} should be valid", preset.name);
        }
    }
}
