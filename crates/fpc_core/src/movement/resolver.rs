//! Axis-separated collision resolution against the static obstacle list.
//!
//! Every pass moves the body along one axis only. A blocked axis leaves the
//! body flush against the nearest blocking face, offset outward by the
//! world's float precision, and never further back than where it started.

use tracing::trace;

use crate::geometry::{Aabb, Axis};
use crate::math::{PlanarVec, Vec3};

use super::world::World;

/// The nearest face blocking a one-axis move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBlock {
    pub axis: Axis,
    pub obstacle_index: usize,
    /// Coordinate of the face the body would rest against.
    pub face: f32,
    /// Sign of the attempted displacement.
    pub positive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisResolution {
    pub position: Vec3,
    pub block: Option<AxisBlock>,
}

impl AxisResolution {
    pub fn blocked(&self) -> bool {
        self.block.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalResolution {
    pub position: Vec3,
    pub blocked: bool,
    /// The flat ground plane, not an obstacle, supplied the support.
    pub rested_on_ground_plane: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalResolution {
    pub position: Vec3,
    pub blocked_x: bool,
    pub blocked_z: bool,
}

/// Tests the body translated by `delta` along `axis` and reports the nearest
/// blocking face, if any. A zero delta is never blocked.
pub fn probe_axis(
    world: &World,
    position: Vec3,
    extents: Vec3,
    axis: Axis,
    delta: f32,
) -> Option<AxisBlock> {
    if delta == 0.0 {
        return None;
    }

    let candidate = Aabb::from_center_extents(position, extents).translated_along(axis, delta);
    let positive = delta > 0.0;
    let mut nearest: Option<AxisBlock> = None;
    for (obstacle_index, obstacle) in world.overlapping(candidate) {
        let face = if positive {
            obstacle.axis_min(axis)
        } else {
            obstacle.axis_max(axis)
        };
        let closer = match nearest {
            None => true,
            Some(current) if positive => face < current.face,
            Some(current) => face > current.face,
        };
        if closer {
            nearest = Some(AxisBlock {
                axis,
                obstacle_index,
                face,
                positive,
            });
        }
    }
    nearest
}

/// Center coordinate that puts the body flush against `block`, limited to
/// the span between the start coordinate and the full move.
fn aligned_coordinate(start: f32, half_extent: f32, delta: f32, block: &AxisBlock, precision: f32) -> f32 {
    if block.positive {
        let target = block.face - precision - half_extent;
        target.min(start + delta).max(start)
    } else {
        let target = block.face + precision + half_extent;
        target.max(start + delta).min(start)
    }
}

fn apply_axis(
    world: &World,
    position: Vec3,
    extents: Vec3,
    axis: Axis,
    delta: f32,
    block: Option<AxisBlock>,
) -> AxisResolution {
    let start = axis.component(position);
    let coordinate = match &block {
        None => start + delta,
        Some(block) => {
            trace!(
                axis = axis.name(),
                obstacle = block.obstacle_index,
                face = block.face,
                "axis_blocked"
            );
            aligned_coordinate(
                start,
                axis.component(extents) * 0.5,
                delta,
                block,
                world.float_precision(),
            )
        }
    };
    AxisResolution {
        position: axis.with_component(position, coordinate),
        block,
    }
}

/// Moves the body along one axis, stopping flush at the first obstacle.
pub fn resolve_axis(
    world: &World,
    position: Vec3,
    extents: Vec3,
    axis: Axis,
    delta: f32,
) -> AxisResolution {
    let block = probe_axis(world, position, extents, axis, delta);
    apply_axis(world, position, extents, axis, delta, block)
}

/// Vertical pass. Obstacles block as on any axis; additionally a downward
/// move whose bottom would cross the ground plane rests on it, unless an
/// obstacle above the plane already holds the body higher.
pub fn resolve_vertical(world: &World, position: Vec3, extents: Vec3, dy: f32) -> VerticalResolution {
    if dy == 0.0 {
        return VerticalResolution {
            position,
            blocked: false,
            rested_on_ground_plane: false,
        };
    }

    let resolution = resolve_axis(world, position, extents, Axis::Y, dy);
    let half_height = extents.y * 0.5;
    let candidate_bottom = position.y - half_height + dy;
    if dy < 0.0 && candidate_bottom < world.ground_height() {
        let ground_center = world.ground_height() + world.float_precision() + half_height;
        let (y, on_plane) = match resolution.block {
            Some(_) if resolution.position.y > ground_center => (resolution.position.y, false),
            _ => (ground_center, true),
        };
        return VerticalResolution {
            position: position.with_y(y),
            blocked: true,
            rested_on_ground_plane: on_plane,
        };
    }

    VerticalResolution {
        position: resolution.position,
        blocked: resolution.blocked(),
        rested_on_ground_plane: false,
    }
}

/// Horizontal pass: X, then Z from the post-X position. When the X and Z
/// moves are both blocked from the starting position the body does not move
/// horizontally at all; there is no sliding along a diagonal.
pub fn resolve_horizontal(
    world: &World,
    position: Vec3,
    extents: Vec3,
    displacement: PlanarVec,
) -> HorizontalResolution {
    let block_x = probe_axis(world, position, extents, Axis::X, displacement.x);
    let block_z = probe_axis(world, position, extents, Axis::Z, displacement.z);
    if block_x.is_some() && block_z.is_some() {
        trace!("both_horizontal_axes_blocked");
        return HorizontalResolution {
            position,
            blocked_x: true,
            blocked_z: true,
        };
    }

    let x = apply_axis(world, position, extents, Axis::X, displacement.x, block_x);
    let z = resolve_axis(world, x.position, extents, Axis::Z, displacement.z);
    HorizontalResolution {
        position: z.position,
        blocked_x: x.blocked(),
        blocked_z: z.blocked(),
    }
}
