//! Game tuning and session settings
//!
//! Read from an optional JSON file. Anything missing or out of range falls back
//! to defaults, so a bad file never stops the game from starting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Rules, Viewport};

/// Tunable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed, `None` picks one from the wall clock
    pub seed: Option<u64>,

    // === Viewport ===
    pub width: f32,
    pub height: f32,

    // === Rules ===
    pub starting_lives: u32,
    /// Chance a destroyed brick drops a pickup (0.0 - 1.0)
    pub pickup_chance: f64,
    /// Same, for golden bricks (0.0 - 1.0)
    pub golden_pickup_chance: f64,

    // === Timing ===
    /// Fixed tick interval in milliseconds
    pub tick_ms: u32,

    // === Audio ===
    /// Ring the terminal bell on notifications
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let rules = Rules::default();
        Self {
            seed: None,

            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,

            starting_lives: rules.starting_lives,
            pickup_chance: rules.pickup_chance,
            golden_pickup_chance: rules.golden_pickup_chance,

            tick_ms: (SIM_DT * 1000.0).round() as u32,

            sound: true,
        }
    }
}

impl Settings {
    /// Parse settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, or defaults when there is no file or it is unusable
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read settings {}: {err}, using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(err) => {
                log::warn!("Malformed settings {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp every value into its usable range
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let probability = |p: f64, fallback: f64| {
            if p.is_finite() {
                p.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };
        let viewport = Viewport::new(self.width, self.height);

        Self {
            width: viewport.width,
            height: viewport.height,
            starting_lives: self.starting_lives.max(1),
            pickup_chance: probability(self.pickup_chance, defaults.pickup_chance),
            golden_pickup_chance: probability(
                self.golden_pickup_chance,
                defaults.golden_pickup_chance,
            ),
            tick_ms: self.tick_ms.max(1),
            ..self
        }
    }

    pub fn rules(&self) -> Rules {
        Rules {
            starting_lives: self.starting_lives,
            pickup_chance: self.pickup_chance,
            golden_pickup_chance: self.golden_pickup_chance,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Tick interval in seconds
    pub fn tick_secs(&self) -> f64 {
        f64::from(self.tick_ms) / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rules() {
        let settings = Settings::default();
        assert_eq!(settings.rules(), Rules::default());
        assert_eq!(settings.tick_ms, 16);
        assert_eq!(settings.viewport(), Viewport::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(42),
            width: 1024.0,
            starting_lives: 5,
            sound: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "pickup_chance": 0.1 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.pickup_chance, 0.1);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
        assert_eq!(settings.width, DEFAULT_WIDTH);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "starting_lives": "three" }"#).is_err());
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = Settings {
            width: 10.0,
            height: f32::INFINITY,
            starting_lives: 0,
            pickup_chance: 3.0,
            golden_pickup_chance: f64::NAN,
            tick_ms: 0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.width, MIN_WIDTH);
        assert_eq!(settings.height, MIN_HEIGHT);
        assert_eq!(settings.starting_lives, 1);
        assert_eq!(settings.pickup_chance, 1.0);
        assert_eq!(settings.golden_pickup_chance, 0.9);
        assert_eq!(settings.tick_ms, 1);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("brickfall-no-such-settings.json");
        assert_eq!(Settings::load(Some(&path)), Settings::default());
        assert_eq!(Settings::load(None), Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("brickfall-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "starting_lives": 0, "tick_ms": 20 }"#).unwrap();
        let settings = Settings::load(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.starting_lives, 1);
        assert_eq!(settings.tick_ms, 20);
    }
}
