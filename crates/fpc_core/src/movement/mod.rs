mod character;
mod config;
mod projector;
mod resolver;
mod speed;
mod stance;
mod step_up;
mod tick;
mod vertical;
mod world;

pub use character::{Character, Rotation, SpeedProfile, Stance};
pub use config::{
    BodyConfig, ConfigError, LookConfig, MovementConfig, SpeedConfig, MAX_FRAME_DELTA,
    MIN_CULL_DISTANCE, REFERENCE_FRAME_RATE,
};
pub use projector::{
    project_horizontal, project_vertical, record_last_directional, DirectionSet, DIAGONAL_SCALE,
};
pub use resolver::{
    probe_axis, resolve_axis, resolve_horizontal, resolve_vertical, AxisBlock, AxisResolution,
    HorizontalResolution, VerticalResolution,
};
pub use speed::{ramp_speed, SpeedCeiling};
pub use stance::{headroom_clear, transition_stance, StanceTransition};
pub use step_up::{try_step_up, StepUp};
pub use tick::{step_character, TickOutcome, TickReport};
pub use vertical::{grounded_next_frame, ground_probe_offset, integrate_vertical, VerticalStep};
pub use world::World;
