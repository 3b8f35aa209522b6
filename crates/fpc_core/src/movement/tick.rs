use serde::Serialize;
use tracing::debug;

use crate::input::{InputAction, InputSnapshot};

use super::character::Character;
use super::projector::{project_horizontal, project_vertical, record_last_directional, DirectionSet};
use super::resolver::{resolve_horizontal, resolve_vertical};
use super::speed::{ramp_speed, SpeedCeiling};
use super::stance::transition_stance;
use super::step_up::try_step_up;
use super::vertical::integrate_vertical;
use super::world::World;

/// What happened during one tick. Observational only; nothing in the core
/// reads it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub frame_delta: f32,
    pub grounded: bool,
    pub jumped: bool,
    pub stepped: bool,
    pub blocked_x: bool,
    pub blocked_y: bool,
    pub blocked_z: bool,
    /// A body that was moving vertically came to rest this tick.
    pub landed: bool,
    pub stance_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub character: Character,
    pub report: TickReport,
}

/// Advances `current` by one tick of `world.frame_delta()` and returns the
/// next snapshot. `current` is never modified.
///
/// Order: look rotation, speed ramp, gravity and jump, step-up (which ends
/// the move when taken), then vertical, X and Z resolution, then the
/// crouch/stand transition.
pub fn step_character(world: &World, current: &Character, input: &InputSnapshot) -> TickOutcome {
    let dt = world.frame_delta();
    let mut next = *current;
    let mut report = TickReport {
        frame_delta: dt,
        ..TickReport::default()
    };

    let look = input.look_delta();
    let rotation = current
        .rotation()
        .apply_look_delta(look.yaw, look.pitch, current.look_config());
    next.set_rotation(rotation);

    let last_directional = record_last_directional(input, current.last_directional_action());
    next.set_last_directional_action(last_directional);

    let crouch_down = input.is_down(InputAction::Crouch);
    let crouching = current.is_crouching() || crouch_down;

    let body = current.bounding_box();
    let vertical = integrate_vertical(
        world,
        &body,
        current.vertical_velocity(),
        current.jump_impulse(),
        crouching,
        input,
    );
    report.grounded = vertical.grounded_next_frame;
    report.jumped = vertical.jumped;

    let ceiling = SpeedCeiling::select(
        crouching,
        input.is_down(InputAction::Sprint),
        vertical.grounded_next_frame,
    );
    let speed = ramp_speed(&current.speed(), ceiling, input.any_directional_down(), dt);

    let directions = DirectionSet::from_input(input, last_directional);
    let horizontal = project_horizontal(rotation.yaw, speed, dt, directions);
    let extents = current.scale();

    let mut velocity = vertical.velocity;
    let mut position = current.position();

    let step = if vertical.was_at_rest && vertical.grounded_next_frame && !vertical.jumped {
        try_step_up(world, position, extents, horizontal)
    } else {
        None
    };

    match step {
        Some(step) => {
            debug!(
                rise = step.rise,
                x = step.position.x,
                z = step.position.z,
                "step_up_taken"
            );
            position = step.position;
            velocity = 0.0;
            report.stepped = true;
        }
        None => {
            let mut dy = project_vertical(velocity, dt);
            if vertical.grounded_next_frame && !vertical.jumped {
                dy = dy.min(-2.0 * world.float_precision());
            }
            let settled = resolve_vertical(world, position, extents, dy);
            if settled.blocked {
                report.landed = dy < 0.0 && !vertical.was_at_rest;
                velocity = 0.0;
            }
            report.blocked_y = settled.blocked;

            let moved = resolve_horizontal(world, settled.position, extents, horizontal);
            position = moved.position;
            report.blocked_x = moved.blocked_x;
            report.blocked_z = moved.blocked_z;
        }
    }

    next.set_position(position);
    next.set_vertical_velocity(velocity);
    next.set_current_speed(speed);
    next.set_stepped(report.stepped);

    let transition = transition_stance(world, &next, crouch_down, horizontal);
    if transition.changed {
        next.set_stance(transition.stance);
        next.set_position(transition.position);
        report.stance_changed = true;
    }

    TickOutcome {
        character: next,
        report,
    }
}

impl Character {
    /// In-place form of [`step_character`].
    pub fn tick(&mut self, world: &World, input: &InputSnapshot) -> TickReport {
        let outcome = step_character(world, self, input);
        *self = outcome.character;
        outcome.report
    }
}
