use std::io::Write;

use fpc_core::movement::REFERENCE_FRAME_RATE;
use fpc_core::{Character, Vec3, World};
use serde::Serialize;
use tracing::info;

use super::bootstrap::AppWiring;
use super::metrics::{MetricsAccumulator, MovementMetricsSnapshot};
use super::script::InputScript;
use super::SandboxError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LoopConfig {
    pub(crate) tick_rate: u32,
    pub(crate) report_every: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            report_every: 60,
        }
    }
}

impl LoopConfig {
    pub(crate) fn tick_period_seconds(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

/// Committed character state after the last tick, as printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct FinalState {
    pub(crate) ticks: u64,
    pub(crate) position: Vec3,
    pub(crate) scale: Vec3,
    pub(crate) eye_position: Vec3,
    pub(crate) yaw: f32,
    pub(crate) pitch: f32,
    pub(crate) is_crouching: bool,
    pub(crate) vertical_velocity: f32,
    pub(crate) speed: f32,
}

impl FinalState {
    fn capture(character: &Character, ticks: u64) -> Self {
        Self {
            ticks,
            position: character.position(),
            scale: character.scale(),
            eye_position: character.eye_position(),
            yaw: character.rotation().yaw,
            pitch: character.rotation().pitch,
            is_crouching: character.is_crouching(),
            vertical_velocity: character.vertical_velocity(),
            speed: character.horizontal_speed(),
        }
    }
}

/// Replays `script` against the character one fixed tick at a time.
pub(crate) fn simulate(
    world: &mut World,
    character: &mut Character,
    script: &InputScript,
    config: &LoopConfig,
) -> FinalState {
    let mut metrics = MetricsAccumulator::new(config.report_every);
    let tick_period = config.tick_period_seconds();
    let mut ticks = 0u64;

    for frame in &script.frames {
        let input = frame.snapshot();
        let seconds = frame
            .frame_time_ms
            .map(|ms| ms / 1000.0)
            .unwrap_or(tick_period);
        for _ in 0..frame.ticks {
            world.set_frame_time(seconds);
            let report = character.tick(world, &input);
            metrics.record_tick(&report, seconds * REFERENCE_FRAME_RATE);
            ticks += 1;
            if let Some(snapshot) = metrics.maybe_snapshot() {
                log_metrics(&snapshot, ticks, character);
            }
        }
    }
    if let Some(snapshot) = metrics.flush() {
        log_metrics(&snapshot, ticks, character);
    }

    FinalState::capture(character, ticks)
}

pub(crate) fn run(app: AppWiring, out: &mut impl Write) -> Result<FinalState, SandboxError> {
    let AppWiring {
        mut world,
        mut character,
        script,
        loop_config,
    } = app;

    info!(
        ticks = script.total_ticks(),
        tick_rate = loop_config.tick_rate,
        obstacle_count = world.obstacles().len(),
        "simulation_started"
    );
    let final_state = simulate(&mut world, &mut character, &script, &loop_config);
    info!(
        ticks = final_state.ticks,
        x = final_state.position.x,
        y = final_state.position.y,
        z = final_state.position.z,
        scale_y = final_state.scale.y,
        is_crouching = final_state.is_crouching,
        vertical_velocity = final_state.vertical_velocity,
        speed = final_state.speed,
        "simulation_finished"
    );

    let json = serde_json::to_string_pretty(&final_state).map_err(SandboxError::Encode)?;
    writeln!(out, "{json}").map_err(SandboxError::Write)?;
    Ok(final_state)
}

fn log_metrics(snapshot: &MovementMetricsSnapshot, total_ticks: u64, character: &Character) {
    info!(
        total_ticks,
        window_ticks = snapshot.ticks,
        grounded_ticks = snapshot.grounded_ticks,
        jumps = snapshot.jumps,
        steps = snapshot.steps,
        landings = snapshot.landings,
        blocked_x = snapshot.blocked_x,
        blocked_z = snapshot.blocked_z,
        stance_changes = snapshot.stance_changes,
        clamped_ticks = snapshot.clamped_ticks,
        speed = character.horizontal_speed(),
        "movement_metrics"
    );
}
