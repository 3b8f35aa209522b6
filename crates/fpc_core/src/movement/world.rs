use tracing::debug;

use crate::geometry::Aabb;

use super::config::{MovementConfig, MAX_FRAME_DELTA, REFERENCE_FRAME_RATE};

/// Static surroundings of the character plus the per-tick frame delta.
///
/// Obstacles are read-only while a tick runs; the only way to change them is
/// through `&mut World` between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    ground_height: f32,
    gravity: f32,
    obstacles: Vec<Aabb>,
    frame_delta: f32,
    float_precision: f32,
    step_height: f32,
    cull_distance_squared: Option<f32>,
}

impl World {
    pub fn new(config: &MovementConfig, ground_height: f32, obstacles: Vec<Aabb>) -> Self {
        Self {
            ground_height,
            gravity: config.gravity,
            obstacles,
            frame_delta: MAX_FRAME_DELTA,
            float_precision: config.float_precision,
            step_height: config.step_height,
            cull_distance_squared: config.cull_distance.map(|distance| distance * distance),
        }
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn obstacles(&self) -> &[Aabb] {
        &self.obstacles
    }

    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    pub fn float_precision(&self) -> f32 {
        self.float_precision
    }

    pub fn step_height(&self) -> f32 {
        self.step_height
    }

    /// Sets the delta for the next tick in normalized frames, clamped to
    /// `[0, MAX_FRAME_DELTA]`. Returns the value that was stored.
    pub fn set_frame_delta(&mut self, frames: f32) -> f32 {
        let clamped = if frames.is_nan() {
            0.0
        } else {
            frames.clamp(0.0, MAX_FRAME_DELTA)
        };
        if clamped != frames {
            debug!(requested = frames, clamped, "frame_delta_clamped");
        }
        self.frame_delta = clamped;
        clamped
    }

    /// Same as [`World::set_frame_delta`] but takes wall-clock seconds.
    pub fn set_frame_time(&mut self, seconds: f32) -> f32 {
        self.set_frame_delta(seconds * REFERENCE_FRAME_RATE)
    }

    /// Obstacles close enough to `probe` on the ground plane to be worth an
    /// exact test, with their indices.
    pub(crate) fn nearby<'a>(&'a self, probe: &Aabb) -> impl Iterator<Item = (usize, &'a Aabb)> + 'a {
        let center = probe.center().planar();
        let limit = self.cull_distance_squared;
        self.obstacles
            .iter()
            .enumerate()
            .filter(move |(_, obstacle)| match limit {
                Some(limit) => obstacle.planar_distance_squared(center) <= limit,
                None => true,
            })
    }

    /// Obstacles that actually intersect `probe`.
    pub(crate) fn overlapping<'a>(&'a self, probe: Aabb) -> impl Iterator<Item = (usize, &'a Aabb)> + 'a {
        self.nearby(&probe)
            .filter(move |(_, obstacle)| obstacle.intersects(&probe))
    }

    pub fn is_blocked(&self, probe: &Aabb) -> bool {
        self.overlapping(*probe).next().is_some()
    }
}
