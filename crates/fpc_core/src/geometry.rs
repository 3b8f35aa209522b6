use serde::{Deserialize, Serialize};

use crate::math::{PlanarVec, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn with_component(self, v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => Vec3 { x: value, ..v },
            Axis::Y => Vec3 { y: value, ..v },
            Axis::Z => Vec3 { z: value, ..v },
        }
    }

    pub fn unit(self, length: f32) -> Vec3 {
        match self {
            Axis::X => Vec3::new(length, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, length, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, length),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Axis-aligned box given by its min and max corners.
///
/// Used for the character body and for every static obstacle. A box whose
/// extent is zero or negative on any axis is degenerate and never intersects
/// anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with full extents `extents`.
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        let half = extents.scaled(0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        Vec3 {
            x: (self.min.x + self.max.x) * 0.5,
            y: (self.min.y + self.max.y) * 0.5,
            z: (self.min.z + self.max.z) * 0.5,
        }
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        // Negated comparisons so NaN corners count as degenerate too.
        !(self.max.x > self.min.x) || !(self.max.y > self.min.y) || !(self.max.z > self.min.z)
    }

    /// Inclusive slab test on all three axes.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn translated_along(&self, axis: Axis, delta: f32) -> Aabb {
        self.translated(axis.unit(delta))
    }

    /// Squared distance on the XZ plane from `point` to the closest point of
    /// this box's footprint. Zero when the point is inside the footprint.
    pub fn planar_distance_squared(&self, point: PlanarVec) -> f32 {
        let dx = (self.min.x - point.x).max(0.0).max(point.x - self.max.x);
        let dz = (self.min.z - point.z).max(0.0).max(point.z - self.max.z);
        dx * dx + dz * dz
    }

    pub fn axis_min(&self, axis: Axis) -> f32 {
        axis.component(self.min)
    }

    pub fn axis_max(&self, axis: Axis) -> f32 {
        axis.component(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_center_extents(Vec3::new(x, y, z), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn overlapping_boxes_intersect() {
        assert!(unit_box_at(0.0, 0.0, 0.0).intersects(&unit_box_at(0.5, 0.5, 0.5)));
    }

    #[test]
    fn separated_on_one_axis_does_not_intersect() {
        assert!(!unit_box_at(0.0, 0.0, 0.0).intersects(&unit_box_at(0.0, 1.5, 0.0)));
        assert!(!unit_box_at(0.0, 0.0, 0.0).intersects(&unit_box_at(0.0, 0.0, -1.01)));
    }

    #[test]
    fn touching_faces_count_as_intersection() {
        assert!(unit_box_at(0.0, 0.0, 0.0).intersects(&unit_box_at(1.0, 0.0, 0.0)));
    }

    #[test]
    fn degenerate_box_never_intersects() {
        let flat = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));
        let inverted = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, 2.0, 2.0));
        let nan = Aabb::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let probe = unit_box_at(0.0, 0.0, 0.0);

        assert!(flat.is_degenerate());
        assert!(inverted.is_degenerate());
        assert!(nan.is_degenerate());
        assert!(!probe.intersects(&flat));
        assert!(!inverted.intersects(&probe));
        assert!(!probe.intersects(&nan));
    }

    #[test]
    fn center_and_extents_round_trip_through_constructor() {
        let b = Aabb::from_center_extents(Vec3::new(4.0, 0.9, 4.0), Vec3::new(0.8, 1.8, 0.8));
        assert!((b.min.y - 0.0).abs() < 1e-6);
        assert!((b.max.y - 1.8).abs() < 1e-6);
        let extents = b.extents();
        assert!((extents.x - 0.8).abs() < 1e-6);
        assert!((b.center().z - 4.0).abs() < 1e-6);
    }

    #[test]
    fn planar_distance_measures_to_footprint_edge() {
        let b = Aabb::new(Vec3::new(0.0, -5.0, 0.0), Vec3::new(2.0, 5.0, 2.0));
        assert_eq!(b.planar_distance_squared(PlanarVec::new(1.0, 1.0)), 0.0);
        assert!((b.planar_distance_squared(PlanarVec::new(5.0, 1.0)) - 9.0).abs() < 1e-6);
        assert!((b.planar_distance_squared(PlanarVec::new(-3.0, -4.0)) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn translated_along_moves_one_axis_only() {
        let b = unit_box_at(0.0, 0.0, 0.0).translated_along(Axis::Z, 2.0);
        assert_eq!(b.center(), Vec3::new(0.0, 0.0, 2.0));
    }
}
