//! Round tuning
//!
//! Every gameplay constant can be overridden from a JSON file. Missing fields
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors from loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Invalid(reason) => write!(f, "Invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

/// Round tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Round length (seconds)
    pub round_duration: f32,
    /// Remaining time at which the attack ramp starts
    pub ramp_threshold: f32,
    /// Attack interval before the ramp
    pub attack_interval: f32,
    /// Lowest attack interval
    pub attack_interval_floor: f32,
    /// Covers-opening intro (seconds)
    pub intro_duration: f32,

    // === Grid ===
    /// Cell selected when the round starts
    pub start_cell: usize,

    // === Crosses ===
    pub cross_travel: f32,
    pub cross_speed: f32,

    // === Animation ===
    pub cover_shut_angle: f32,
    pub cover_open_rate: f32,
    pub box_sway_range: f32,
    pub box_sway_speed: f32,
    pub hit_shrink: f32,
    pub life_decay_rate: f32,
    pub life_spin_rate: f32,

    // === Scoring ===
    pub score_per_life: u32,
    pub score_per_coffin: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_duration: ROUND_DURATION,
            ramp_threshold: RAMP_THRESHOLD,
            attack_interval: ATTACK_INTERVAL,
            attack_interval_floor: ATTACK_INTERVAL_FLOOR,
            intro_duration: INTRO_DURATION,

            start_cell: START_CELL,

            cross_travel: CROSS_TRAVEL,
            cross_speed: CROSS_SPEED,

            cover_shut_angle: COVER_SHUT_ANGLE,
            cover_open_rate: COVER_OPEN_RATE,
            box_sway_range: BOX_SWAY_RANGE,
            box_sway_speed: BOX_SWAY_SPEED,
            hit_shrink: HIT_SHRINK,
            life_decay_rate: LIFE_DECAY_RATE,
            life_spin_rate: LIFE_SPIN_RATE,

            score_per_life: SCORE_PER_LIFE,
            score_per_coffin: SCORE_PER_COFFIN,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a settings file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.round_duration <= 0.0 {
            return Err(SettingsError::Invalid("round_duration must be positive"));
        }
        if self.ramp_threshold <= 0.0 {
            return Err(SettingsError::Invalid("ramp_threshold must be positive"));
        }
        if self.attack_interval_floor <= 0.0 {
            return Err(SettingsError::Invalid("attack_interval_floor must be positive"));
        }
        if self.attack_interval_floor > self.attack_interval {
            return Err(SettingsError::Invalid(
                "attack_interval_floor exceeds attack_interval",
            ));
        }
        if self.intro_duration < 0.0 {
            return Err(SettingsError::Invalid("intro_duration must not be negative"));
        }
        if self.start_cell >= CELL_COUNT {
            return Err(SettingsError::Invalid("start_cell outside the grid"));
        }
        if self.cross_travel <= 0.0 || self.cross_speed <= 0.0 {
            return Err(SettingsError::Invalid("cross travel and speed must be positive"));
        }
        if !(0.0..1.0).contains(&self.hit_shrink) {
            return Err(SettingsError::Invalid("hit_shrink must be in [0, 1)"));
        }
        if self.cover_open_rate <= 0.0 {
            return Err(SettingsError::Invalid("cover_open_rate must be positive"));
        }
        if self.box_sway_range < 0.0 {
            return Err(SettingsError::Invalid("box_sway_range must not be negative"));
        }
        if self.box_sway_speed <= 0.0 {
            return Err(SettingsError::Invalid("box_sway_speed must be positive"));
        }
        if self.life_decay_rate <= 0.0 || self.life_spin_rate <= 0.0 {
            return Err(SettingsError::Invalid("life decay and spin rates must be positive"));
        }
        Ok(())
    }

    /// Total lives at round start
    pub fn total_lives(&self) -> u32 {
        (CELL_COUNT * LIVES_PER_COFFIN) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        assert_eq!(Settings::default().total_lives(), 27);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "round_duration": 30.0 }"#).unwrap();
        assert_eq!(settings.round_duration, 30.0);
        assert_eq!(settings.attack_interval, ATTACK_INTERVAL);
        assert_eq!(settings.start_cell, START_CELL);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            r#"{ "round_duration": 0.0 }"#,
            r#"{ "ramp_threshold": -1.0 }"#,
            r#"{ "attack_interval_floor": 0.0 }"#,
            r#"{ "attack_interval_floor": 5.0 }"#,
            r#"{ "intro_duration": -0.5 }"#,
            r#"{ "start_cell": 9 }"#,
            r#"{ "cross_travel": 0.0 }"#,
            r#"{ "cross_speed": -1.5 }"#,
            r#"{ "hit_shrink": 1.0 }"#,
            r#"{ "cover_open_rate": 0.0 }"#,
            r#"{ "box_sway_range": -15.0 }"#,
            r#"{ "box_sway_speed": -180.0 }"#,
            r#"{ "life_decay_rate": -1.0 }"#,
            r#"{ "life_spin_rate": 0.0 }"#,
        ];
        for json in bad {
            assert!(
                matches!(Settings::from_json(json), Err(SettingsError::Invalid(_))),
                "accepted {}",
                json
            );
        }
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_sway_range_is_allowed() {
        let settings = Settings::from_json(r#"{ "box_sway_range": 0.0 }"#).unwrap();
        assert_eq!(settings.box_sway_range, 0.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/coffin-guard.json");
        assert_eq!(settings, Settings::default());
    }
}
