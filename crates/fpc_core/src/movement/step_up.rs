use crate::geometry::Aabb;
use crate::math::{PlanarVec, Vec3};

use super::world::World;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepUp {
    pub position: Vec3,
    /// Height gained by the feet.
    pub rise: f32,
}

/// Tries to turn a blocked horizontal move into a lift onto the obstacle.
///
/// The move qualifies when it is blocked at the body's current height but
/// clear once the body is raised by `step_height + float_precision`, and the
/// raised body itself has headroom. The body then takes the move and rests
/// on the highest top among the obstacles it ran into.
///
/// The combined move is tried first. If that fails, the X-only and then the
/// Z-only part of the move are tried, so a body sliding along a wall can
/// still climb a step in front of it.
///
/// Callers only use this for a body at vertical rest.
pub fn try_step_up(
    world: &World,
    position: Vec3,
    extents: Vec3,
    horizontal: PlanarVec,
) -> Option<StepUp> {
    if horizontal.is_zero() {
        return None;
    }

    step_along(world, position, extents, horizontal)
        .or_else(|| step_along(world, position, extents, PlanarVec::new(horizontal.x, 0.0)))
        .or_else(|| step_along(world, position, extents, PlanarVec::new(0.0, horizontal.z)))
}

fn step_along(world: &World, position: Vec3, extents: Vec3, horizontal: PlanarVec) -> Option<StepUp> {
    if horizontal.is_zero() {
        return None;
    }

    let precision = world.float_precision();
    let body = Aabb::from_center_extents(position, extents);
    let moved = body.translated(horizontal.to_vec3(0.0));
    let support_top = world
        .overlapping(moved)
        .map(|(_, obstacle)| obstacle.max.y)
        .reduce(f32::max)?;

    let raised = body.translated(Vec3::new(0.0, world.step_height() + precision, 0.0));
    if world.is_blocked(&raised) {
        return None;
    }
    if world.is_blocked(&raised.translated(horizontal.to_vec3(0.0))) {
        return None;
    }

    let landed = Vec3::new(
        position.x + horizontal.x,
        support_top + precision + extents.y * 0.5,
        position.z + horizontal.z,
    );
    if world.is_blocked(&Aabb::from_center_extents(landed, extents)) {
        return None;
    }

    Some(StepUp {
        position: landed,
        rise: support_top - body.min.y,
    })
}
