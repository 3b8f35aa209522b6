pub mod geometry;
pub mod input;
pub mod level;
pub mod math;
pub mod movement;

pub use geometry::{Aabb, Axis};
pub use input::{ActionStates, InputAction, InputSnapshot, LookDelta, DIRECTIONAL_ACTIONS};
pub use level::{load_level, Level, LevelLoadError, LevelLoadReport};
pub use math::{PlanarVec, Vec3};
pub use movement::{
    step_character, Character, ConfigError, MovementConfig, Rotation, Stance, TickOutcome,
    TickReport, World, MAX_FRAME_DELTA,
};
