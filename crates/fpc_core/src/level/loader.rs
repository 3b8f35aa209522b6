use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::geometry::Aabb;
use crate::math::Vec3;
use crate::movement::{Character, MovementConfig, World};

use super::document::{demo_level_document, LevelDocument, LEVEL_FORMAT_VERSION};

#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("failed to read level file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse level {path} at {json_path}: {message}")]
    Parse {
        path: PathBuf,
        json_path: String,
        message: String,
    },
    #[error("level {path} has format_version {found}, expected {expected}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("level {path}: {field} must be a finite number, got {value}")]
    NonFinite {
        path: PathBuf,
        field: String,
        value: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub bounds: Aabb,
    pub label: Option<String>,
}

/// A validated level: every obstacle has positive volume and finite corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    ground_height: f32,
    spawn: Option<Vec3>,
    obstacles: Vec<Obstacle>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelLoadReport {
    pub obstacle_count: usize,
    pub dropped_degenerate: usize,
}

impl Level {
    pub fn from_document(
        document: LevelDocument,
        origin: &Path,
    ) -> Result<(Self, LevelLoadReport), LevelLoadError> {
        if document.format_version != LEVEL_FORMAT_VERSION {
            return Err(LevelLoadError::UnsupportedVersion {
                path: origin.to_path_buf(),
                found: document.format_version,
                expected: LEVEL_FORMAT_VERSION,
            });
        }
        require_finite(origin, "ground_height".to_string(), document.ground_height)?;
        if let Some(spawn) = document.spawn {
            require_finite_vec(origin, "spawn", spawn)?;
        }

        let mut report = LevelLoadReport::default();
        let mut obstacles = Vec::with_capacity(document.obstacles.len());
        for (index, obstacle) in document.obstacles.into_iter().enumerate() {
            require_finite_vec(origin, &format!("obstacles[{index}].min"), obstacle.min)?;
            require_finite_vec(origin, &format!("obstacles[{index}].max"), obstacle.max)?;

            let bounds = obstacle.bounds();
            if bounds.is_degenerate() {
                warn!(
                    path = %origin.display(),
                    index,
                    label = obstacle.label.as_deref().unwrap_or(""),
                    "degenerate_obstacle_dropped"
                );
                report.dropped_degenerate += 1;
                continue;
            }
            obstacles.push(Obstacle {
                bounds,
                label: obstacle.label,
            });
        }
        report.obstacle_count = obstacles.len();

        Ok((
            Self {
                ground_height: document.ground_height,
                spawn: document.spawn,
                obstacles,
            },
            report,
        ))
    }

    /// Built-in playground, used when no level file is given.
    pub fn demo() -> Self {
        let document = demo_level_document();
        Self {
            ground_height: document.ground_height,
            spawn: document.spawn,
            obstacles: document
                .obstacles
                .into_iter()
                .map(|obstacle| Obstacle {
                    bounds: obstacle.bounds(),
                    label: obstacle.label,
                })
                .collect(),
        }
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    pub fn spawn(&self) -> Option<Vec3> {
        self.spawn
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacle_bounds(&self) -> Vec<Aabb> {
        self.obstacles.iter().map(|obstacle| obstacle.bounds).collect()
    }

    /// World with the obstacles in document order.
    pub fn build_world(&self, config: &MovementConfig) -> World {
        World::new(config, self.ground_height, self.obstacle_bounds())
    }

    /// Character at the spawn point, or standing on the ground at the origin
    /// when the level has none.
    pub fn spawn_character(&self, config: &MovementConfig) -> Character {
        match self.spawn {
            Some(position) => Character::new(config, position),
            None => Character::standing_on(config, 0.0, self.ground_height, 0.0),
        }
    }
}

pub fn parse_level(raw: &str, origin: &Path) -> Result<(Level, LevelLoadReport), LevelLoadError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let document: LevelDocument =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
            let json_path = error.path().to_string();
            LevelLoadError::Parse {
                path: origin.to_path_buf(),
                json_path,
                message: error.into_inner().to_string(),
            }
        })?;
    Level::from_document(document, origin)
}

pub fn load_level(path: &Path) -> Result<(Level, LevelLoadReport), LevelLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LevelLoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let (level, report) = parse_level(&raw, path)?;
    info!(
        path = %path.display(),
        obstacle_count = report.obstacle_count,
        dropped_degenerate = report.dropped_degenerate,
        ground_height = level.ground_height,
        "level_loaded"
    );
    Ok((level, report))
}

fn require_finite(origin: &Path, field: String, value: f32) -> Result<(), LevelLoadError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LevelLoadError::NonFinite {
            path: origin.to_path_buf(),
            field,
            value,
        })
    }
}

fn require_finite_vec(origin: &Path, field: &str, value: Vec3) -> Result<(), LevelLoadError> {
    require_finite(origin, format!("{field}.x"), value.x)?;
    require_finite(origin, format!("{field}.y"), value.y)?;
    require_finite(origin, format!("{field}.z"), value.z)
}
