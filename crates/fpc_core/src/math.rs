use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn planar(self) -> PlanarVec {
        PlanarVec {
            x: self.x,
            z: self.z,
        }
    }

    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Horizontal-only pair on the ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanarVec {
    pub x: f32,
    pub z: f32,
}

impl PlanarVec {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.z * self.z
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.z == 0.0
    }

    pub fn to_vec3(self, y: f32) -> Vec3 {
        Vec3 {
            x: self.x,
            y,
            z: self.z,
        }
    }
}

impl std::ops::Add for PlanarVec {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            z: self.z + rhs.z,
        }
    }
}

impl std::ops::Mul<f32> for PlanarVec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            x: self.x * rhs,
            z: self.z * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_drops_height() {
        let v = Vec3::new(1.0, 5.0, -2.0);
        assert_eq!(v.planar(), PlanarVec::new(1.0, -2.0));
        assert_eq!(v.planar().to_vec3(0.5), Vec3::new(1.0, 0.5, -2.0));
    }

    #[test]
    fn non_finite_components_are_detected() {
        assert!(Vec3::new(0.0, 1.0, 2.0).is_finite());
        assert!(!Vec3::new(f32::NAN, 1.0, 2.0).is_finite());
        assert!(!Vec3::new(0.0, f32::INFINITY, 2.0).is_finite());
    }
}
