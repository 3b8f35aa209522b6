use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::math::Vec3;

pub const LEVEL_FORMAT_VERSION: u32 = 1;

/// On-disk shape of a level file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelDocument {
    pub format_version: u32,
    pub ground_height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn: Option<Vec3>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleDocument {
    pub min: Vec3,
    pub max: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ObstacleDocument {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }
}

/// The playground level: a floating slab, a two-unit block, and a
/// half-sunk half-unit step, with the spawn point beside them.
pub fn demo_level_document() -> LevelDocument {
    let obstacle = |min: Vec3, max: Vec3, label: &str| ObstacleDocument {
        min,
        max,
        label: Some(label.to_string()),
    };
    LevelDocument {
        format_version: LEVEL_FORMAT_VERSION,
        ground_height: 0.0,
        spawn: Some(Vec3::new(4.0, 0.9, 4.0)),
        obstacles: vec![
            obstacle(
                Vec3::new(-1.0, 1.5, -1.0),
                Vec3::new(1.0, 3.5, 1.0),
                "floating_slab",
            ),
            obstacle(Vec3::new(2.0, 0.0, -1.0), Vec3::new(4.0, 2.0, 1.0), "block"),
            obstacle(
                Vec3::new(5.0, -1.5, -1.0),
                Vec3::new(7.0, 0.5, 1.0),
                "sunken_step",
            ),
        ],
    }
}
