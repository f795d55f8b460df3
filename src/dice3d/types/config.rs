//! Lounge configuration types and loading
//!
//! Every tunable of the roll engine lives here: arena size, die body
//! parameters, throw shaping and the physics clock. A config file may
//! override any subset of fields; everything else keeps its default.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid RON config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format '{0}' (expected .ron or .json)")]
    UnsupportedFormat(String),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Play area geometry and the corrective bounds parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub half_extent_x: f32,
    pub half_extent_z: f32,
    pub ceiling_height: f32,
    /// Velocity kept (and reflected) when a body is pushed back from a side.
    pub wall_restitution: f32,
    /// Velocity kept (and reflected) when a body is pushed down from the ceiling.
    pub ceiling_restitution: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            half_extent_x: 3.2,
            half_extent_z: 3.2,
            ceiling_height: 6.0,
            wall_restitution: 0.6,
            ceiling_restitution: 0.5,
            wall_height: 3.5,
            wall_thickness: 0.2,
        }
    }
}

/// Physical properties shared by every die body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceSettings {
    pub count: usize,
    /// Edge length of the cube.
    pub size: f32,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Speed under which a die starts counting towards rest.
    pub sleep_speed_limit: f32,
    /// Seconds a die must stay under the speed limit to count as resting.
    pub sleep_time_limit: f32,
    /// Spacing of the resting layout used on spawn and reset.
    pub rest_spacing: f32,
    pub rest_height: f32,
    pub rest_depth_spread: f32,
}

impl Default for DiceSettings {
    fn default() -> Self {
        Self {
            count: 1,
            size: 0.9,
            mass: 1.0,
            linear_damping: 0.35,
            angular_damping: 0.4,
            friction: 0.3,
            restitution: 0.25,
            sleep_speed_limit: 0.2,
            sleep_time_limit: 0.6,
            rest_spacing: 1.2,
            rest_height: 1.2,
            rest_depth_spread: 0.8,
        }
    }
}

impl DiceSettings {
    /// Height of a die's center when it lies flat on the floor.
    pub fn floor_rest_height(&self) -> f32 {
        self.size / 2.0
    }
}

/// Shaping of the launch impulse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowSettings {
    pub spawn_spacing: f32,
    pub spawn_height_min: f32,
    pub spawn_height_jitter: f32,
    pub spawn_depth_min: f32,
    pub spawn_depth_jitter: f32,
    pub base_force: f32,
    /// Full width of the uniform horizontal velocity jitter.
    pub horizontal_jitter: f32,
    pub base_upward_speed: f32,
    pub upward_jitter: f32,
    /// Full width of the angular velocity range for the default throw.
    pub default_spin_range: f32,
    /// Full width of the angular velocity range for gesture throws.
    pub gesture_spin_range: f32,
    /// Minimum drag length (screen pixels) that counts as a throw.
    pub drag_threshold: f32,
    pub strength_divisor: f32,
    pub strength_min: f32,
    pub strength_max: f32,
    pub lift_divisor: f32,
    pub lift_min: f32,
    pub lift_max: f32,
}

impl Default for ThrowSettings {
    fn default() -> Self {
        Self {
            spawn_spacing: 1.1,
            spawn_height_min: 2.2,
            spawn_height_jitter: 0.8,
            spawn_depth_min: -1.0,
            spawn_depth_jitter: 0.4,
            base_force: 4.5,
            horizontal_jitter: 1.5,
            base_upward_speed: 6.0,
            upward_jitter: 2.0,
            default_spin_range: 18.0,
            gesture_spin_range: 10.0,
            drag_threshold: 35.0,
            strength_divisor: 220.0,
            strength_min: 0.55,
            strength_max: 1.15,
            lift_divisor: 250.0,
            lift_min: 0.8,
            lift_max: 1.5,
        }
    }
}

/// Simulation clock and world parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: f32,
    pub fixed_hz: f64,
    pub max_substeps: u32,
    pub roll_timeout_secs: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: -22.0,
            fixed_hz: 120.0,
            max_substeps: 5,
            roll_timeout_secs: 8.0,
        }
    }
}

impl PhysicsSettings {
    pub fn fixed_step_secs(&self) -> f32 {
        (1.0 / self.fixed_hz) as f32
    }

    /// Largest frame delta the fixed loop will consume in one frame.
    pub fn max_frame_delta_secs(&self) -> f64 {
        self.max_substeps as f64 / self.fixed_hz
    }
}

/// Complete lounge configuration, inserted as a resource at startup.
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoungeConfig {
    pub arena: ArenaSettings,
    pub dice: DiceSettings,
    pub throw: ThrowSettings,
    pub physics: PhysicsSettings,
    /// Fixed seed for the throw RNG; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl LoungeConfig {
    /// Load a config file; the format is picked from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let config: LoungeConfig = match extension.as_str() {
            "ron" => ron::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        config.validate()?;
        info!("Loaded lounge config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it can't be used.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Could not load config {}: {}; using defaults",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.arena.half_extent_x <= 0.0 || self.arena.half_extent_z <= 0.0 {
            return invalid("arena half extents must be positive");
        }
        if self.arena.ceiling_height <= self.dice.floor_rest_height() {
            return invalid("arena ceiling must be above the floor rest height");
        }
        if self.dice.size <= 0.0 || self.dice.mass <= 0.0 {
            return invalid("dice size and mass must be positive");
        }
        if self.throw.strength_min > self.throw.strength_max {
            return invalid("throw strength_min exceeds strength_max");
        }
        if self.throw.lift_min > self.throw.lift_max {
            return invalid("throw lift_min exceeds lift_max");
        }
        if self.throw.strength_divisor <= 0.0 || self.throw.lift_divisor <= 0.0 {
            return invalid("throw divisors must be positive");
        }
        if self.physics.fixed_hz <= 0.0 || self.physics.max_substeps == 0 {
            return invalid("physics step rate and substeps must be non-zero");
        }
        if self.physics.roll_timeout_secs <= 0.0 {
            return invalid("roll timeout must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LoungeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config: LoungeConfig =
            ron::from_str("(dice: (count: 4), physics: (roll_timeout_secs: 5.0))").unwrap();
        assert_eq!(config.dice.count, 4);
        assert_eq!(config.dice.size, 0.9);
        assert_eq!(config.physics.roll_timeout_secs, 5.0);
        assert_eq!(config.physics.fixed_hz, 120.0);
        assert_eq!(config.arena, ArenaSettings::default());
    }

    #[test]
    fn test_json_config_with_seed() {
        let config: LoungeConfig =
            serde_json::from_str(r#"{ "seed": 42, "arena": { "ceiling_height": 5.0 } }"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.arena.ceiling_height, 5.0);
        assert_eq!(config.arena.half_extent_x, 3.2);
    }

    #[test]
    fn test_validate_rejects_inverted_strength_clamp() {
        let mut config = LoungeConfig::default();
        config.throw.strength_min = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("dicelounge_config_test.toml");
        std::fs::write(&path, "seed = 1").unwrap();
        let result = LoungeConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = LoungeConfig::load_or_default("/definitely/not/here.ron");
        assert_eq!(config, LoungeConfig::default());
    }

    #[test]
    fn test_fixed_step_and_frame_cap() {
        let physics = PhysicsSettings::default();
        assert!((physics.fixed_step_secs() - 1.0 / 120.0).abs() < 1e-6);
        assert!((physics.max_frame_delta_secs() - 5.0 / 120.0).abs() < 1e-9);
    }
}
