use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for one tick's frame delta, in normalized frames.
pub const MAX_FRAME_DELTA: f32 = 1.0;
/// Wall-clock rate that one normalized frame corresponds to.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;
pub const MIN_CULL_DISTANCE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeedConfig {
    pub normal: f32,
    pub sprint: f32,
    pub crouch: f32,
    pub acceleration: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            normal: 0.1,
            sprint: 0.15,
            crouch: 0.05,
            acceleration: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub crouch_height: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            width: 0.8,
            height: 1.8,
            depth: 0.8,
            crouch_height: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookConfig {
    pub sensitivity: f32,
    pub pitch_limit: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0025,
            pitch_limit: 1.57,
        }
    }
}

/// Every tunable of the movement core. Speeds, gravity and impulses are per
/// normalized frame; lengths are world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementConfig {
    pub speed: SpeedConfig,
    pub body: BodyConfig,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub step_height: f32,
    pub float_precision: f32,
    pub cull_distance: Option<f32>,
    pub look: LookConfig,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: SpeedConfig::default(),
            body: BodyConfig::default(),
            gravity: 0.0065,
            jump_impulse: 0.15,
            step_height: 0.5,
            float_precision: 1e-4,
            cull_distance: Some(16.0),
            look: LookConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config value {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("config value {field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("body.crouch_height ({crouch}) must be less than body.height ({standing})")]
    CrouchNotShorter { crouch: f32, standing: f32 },
    #[error(
        "speed ceilings must satisfy crouch <= normal <= sprint, got crouch={crouch} normal={normal} sprint={sprint}"
    )]
    CeilingOrder { crouch: f32, normal: f32, sprint: f32 },
    #[error("cull_distance must be at least {min}, got {value}")]
    CullDistanceTooSmall { min: f32, value: f32 },
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path} at {json_path}: {message}")]
    Parse {
        path: PathBuf,
        json_path: String,
        message: String,
    },
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive_fields = [
            ("speed.normal", self.speed.normal),
            ("speed.sprint", self.speed.sprint),
            ("speed.crouch", self.speed.crouch),
            ("speed.acceleration", self.speed.acceleration),
            ("body.width", self.body.width),
            ("body.height", self.body.height),
            ("body.depth", self.body.depth),
            ("body.crouch_height", self.body.crouch_height),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("step_height", self.step_height),
            ("float_precision", self.float_precision),
            ("look.sensitivity", self.look.sensitivity),
            ("look.pitch_limit", self.look.pitch_limit),
        ];
        for (field, value) in positive_fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.body.crouch_height >= self.body.height {
            return Err(ConfigError::CrouchNotShorter {
                crouch: self.body.crouch_height,
                standing: self.body.height,
            });
        }
        if self.speed.crouch > self.speed.normal || self.speed.normal > self.speed.sprint {
            return Err(ConfigError::CeilingOrder {
                crouch: self.speed.crouch,
                normal: self.speed.normal,
                sprint: self.speed.sprint,
            });
        }
        if let Some(value) = self.cull_distance {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite {
                    field: "cull_distance",
                    value,
                });
            }
            if value < MIN_CULL_DISTANCE {
                return Err(ConfigError::CullDistanceTooSmall {
                    min: MIN_CULL_DISTANCE,
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn max_speed(&self) -> f32 {
        self.speed.sprint.max(self.speed.normal).max(self.speed.crouch)
    }

    /// Parses and validates a JSON config document. Missing fields take their
    /// defaults.
    pub fn from_json_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let config: MovementConfig = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|error| {
                let json_path = error.path().to_string();
                ConfigError::Parse {
                    path: origin.to_path_buf(),
                    json_path,
                    message: error.into_inner().to_string(),
                }
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, path)
    }
}
