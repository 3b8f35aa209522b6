use std::f32::consts::FRAC_1_SQRT_2;

use crate::input::{InputAction, InputSnapshot, DIRECTIONAL_ACTIONS};
use crate::math::PlanarVec;

/// Scale applied when one forward/backward and one left/right direction
/// contribute together.
pub const DIAGONAL_SCALE: f32 = FRAC_1_SQRT_2;

/// Directions contributing to this tick's motion: everything held, plus the
/// last directional action so a released key still carries the body while
/// the speed ramp winds down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionSet {
    pub fn from_input(input: &InputSnapshot, last: Option<InputAction>) -> Self {
        let contributes = |action: InputAction| input.is_down(action) || last == Some(action);
        Self {
            forward: contributes(InputAction::Forward),
            backward: contributes(InputAction::Backward),
            left: contributes(InputAction::Left),
            right: contributes(InputAction::Right),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }

    /// Exactly one of forward/backward together with exactly one of
    /// left/right.
    pub fn is_diagonal(&self) -> bool {
        (self.forward != self.backward) && (self.left != self.right)
    }
}

/// The last directional action held this tick, or `previous` if none is.
pub fn record_last_directional(
    input: &InputSnapshot,
    previous: Option<InputAction>,
) -> Option<InputAction> {
    DIRECTIONAL_ACTIONS
        .iter()
        .rev()
        .copied()
        .find(|action| input.is_down(*action))
        .or(previous)
}

/// Horizontal displacement for one tick. At yaw 0 forward is -X and right
/// is -Z; yaw rotates both about the vertical axis.
pub fn project_horizontal(yaw: f32, speed: f32, dt: f32, directions: DirectionSet) -> PlanarVec {
    if directions.is_empty() || speed == 0.0 || dt == 0.0 {
        return PlanarVec::ZERO;
    }

    let mut distance = speed * dt;
    if directions.is_diagonal() {
        distance *= DIAGONAL_SCALE;
    }
    let along = yaw.cos() * distance;
    let across = yaw.sin() * distance;

    let mut displacement = PlanarVec::ZERO;
    if directions.forward {
        displacement.x -= along;
        displacement.z -= across;
    }
    if directions.backward {
        displacement.x += along;
        displacement.z += across;
    }
    if directions.left {
        displacement.x -= across;
        displacement.z += along;
    }
    if directions.right {
        displacement.x += across;
        displacement.z -= along;
    }
    displacement
}

pub fn project_vertical(vertical_velocity: f32, dt: f32) -> f32 {
    vertical_velocity * dt
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn directions(actions: &[InputAction]) -> DirectionSet {
        DirectionSet::from_input(&InputSnapshot::from_actions(actions), None)
    }

    #[test]
    fn forward_at_zero_yaw_moves_negative_x() {
        let d = project_horizontal(0.0, 0.1, 1.0, directions(&[InputAction::Forward]));
        assert!((d.x + 0.1).abs() < 1e-6);
        assert!(d.z.abs() < 1e-6);
    }

    #[test]
    fn right_is_perpendicular_to_forward() {
        let d = project_horizontal(0.0, 0.1, 1.0, directions(&[InputAction::Right]));
        assert!(d.x.abs() < 1e-6);
        assert!((d.z + 0.1).abs() < 1e-6);

        let d = project_horizontal(FRAC_PI_2, 0.1, 1.0, directions(&[InputAction::Forward]));
        assert!(d.x.abs() < 1e-6);
        assert!((d.z + 0.1).abs() < 1e-6);
    }

    #[test]
    fn diagonal_keeps_the_same_distance() {
        let d = project_horizontal(
            0.3,
            0.1,
            1.0,
            directions(&[InputAction::Forward, InputAction::Left]),
        );
        assert!((d.length_squared().sqrt() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn opposing_keys_cancel_without_diagonal_scale() {
        let set = directions(&[InputAction::Forward, InputAction::Backward]);
        assert!(!set.is_diagonal());
        let d = project_horizontal(0.7, 0.1, 1.0, set);
        assert!(d.length_squared() < 1e-12);
    }

    #[test]
    fn three_directions_are_not_diagonal() {
        let set = directions(&[InputAction::Forward, InputAction::Left, InputAction::Right]);
        assert!(!set.is_diagonal());
    }

    #[test]
    fn released_key_keeps_contributing_through_last_action() {
        let set = DirectionSet::from_input(&InputSnapshot::empty(), Some(InputAction::Backward));
        assert!(set.backward);
        let d = project_horizontal(0.0, 0.05, 1.0, set);
        assert!((d.x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn last_directional_prefers_later_actions_and_persists() {
        let held = InputSnapshot::from_actions(&[InputAction::Forward, InputAction::Right]);
        assert_eq!(record_last_directional(&held, None), Some(InputAction::Right));
        assert_eq!(
            record_last_directional(&InputSnapshot::empty(), Some(InputAction::Left)),
            Some(InputAction::Left)
        );
        let jump_only = InputSnapshot::from_actions(&[InputAction::Jump]);
        assert_eq!(record_last_directional(&jump_only, None), None);
    }

    #[test]
    fn vertical_is_velocity_times_delta() {
        assert!((project_vertical(-0.2, 0.5) + 0.1).abs() < 1e-7);
    }
}
