//! Spin feel tuning
//!
//! All the knobs are fixed at construction time; the RON file exists so the
//! feel can be tweaked without touching code. Missing fields fall back to
//! the defaults, a broken file falls back entirely (with a console warning).

use serde::{Deserialize, Serialize};

/// Constants governing drag sensitivity and the decaying idle spin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTuning {
    /// Fraction of velocity shed (or gained) per frame while relaxing
    /// toward the resting velocity
    pub velocity_change_coeff: f32,
    /// Ceiling on the release velocity, radians per frame
    pub max_velocity: f32,
    /// Idle spin rate the velocity relaxes toward, radians per frame
    pub resting_velocity: f32,
    /// Floor used to nudge a velocity of exactly zero, so the relaxation
    /// step has something to grow from
    pub minimum_velocity: f32,
    /// How many recent drag increments the release estimator averages
    pub history_capacity: usize,
    /// Degrees of rotation per pixel-per-millisecond of pointer speed
    pub rot_sensitivity: f32,
    /// Minimum interval between pointer samples fed to the spinner
    pub pointer_throttle_ms: f64,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            velocity_change_coeff: 0.005,
            max_velocity: 0.3,
            resting_velocity: 0.01,
            minimum_velocity: 0.0002,
            history_capacity: 3,
            rot_sensitivity: 5.0,
            pointer_throttle_ms: 10.0,
        }
    }
}

/// Parse tuning from RON, falling back to defaults on any parse error
pub fn parse_tuning(source: &str) -> SpinTuning {
    match ron::from_str(source) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("Failed to parse spin tuning, using defaults: {}", e);
            SpinTuning::default()
        }
    }
}

/// Load the tuning file embedded at build time
pub fn load_tuning() -> SpinTuning {
    parse_tuning(include_str!("../assets/tuning.ron"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_file_parses() {
        let tuning = load_tuning();
        assert!((tuning.max_velocity - 0.3).abs() < 1e-6);
        assert_eq!(tuning.history_capacity, 3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tuning = parse_tuning("(max_velocity: 0.5)");
        assert!((tuning.max_velocity - 0.5).abs() < 1e-6);
        assert!((tuning.resting_velocity - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_garbage_falls_back() {
        let tuning = parse_tuning("not ron at all {");
        assert!((tuning.max_velocity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip() {
        let tuning = SpinTuning::default();
        let text = ron::to_string(&tuning).unwrap();
        let back = parse_tuning(&text);
        assert!((back.rot_sensitivity - tuning.rot_sensitivity).abs() < 1e-6);
    }
}
