use crate::geometry::Aabb;
use crate::input::{InputAction, InputSnapshot};

use super::world::World;

/// Vertical velocity for the coming move and the facts derived with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalStep {
    pub velocity: f32,
    pub grounded_next_frame: bool,
    pub jumped: bool,
    /// The committed velocity was exactly zero before gravity was applied.
    pub was_at_rest: bool,
}

/// Downward offset used by the ground probe for a given post-gravity
/// velocity, or `None` while the body is moving up.
pub fn ground_probe_offset(world: &World, velocity_after_gravity: f32) -> Option<f32> {
    if velocity_after_gravity > 0.0 {
        return None;
    }
    let projected = velocity_after_gravity * world.frame_delta();
    Some(projected.min(-2.0 * world.float_precision()))
}

/// Predicts contact with the ground plane or an obstacle top on the next
/// move, projecting the body down by the post-gravity velocity.
pub fn grounded_next_frame(world: &World, body: &Aabb, velocity_after_gravity: f32) -> bool {
    let Some(offset) = ground_probe_offset(world, velocity_after_gravity) else {
        return false;
    };
    let probe = body.translated(crate::math::Vec3::new(0.0, offset, 0.0));
    probe.min.y < world.ground_height() || world.is_blocked(&probe)
}

/// Applies gravity, then starts a jump when the jump action is held, the body
/// was at rest, it is grounded next frame, and it is not crouching.
pub fn integrate_vertical(
    world: &World,
    body: &Aabb,
    committed_velocity: f32,
    jump_impulse: f32,
    crouching: bool,
    input: &InputSnapshot,
) -> VerticalStep {
    let was_at_rest = committed_velocity == 0.0;
    let velocity = committed_velocity - world.gravity() * world.frame_delta();
    let grounded_next_frame = grounded_next_frame(world, body, velocity);

    let jumped = input.is_down(InputAction::Jump) && was_at_rest && grounded_next_frame && !crouching;
    VerticalStep {
        velocity: if jumped { jump_impulse } else { velocity },
        grounded_next_frame,
        jumped,
        was_at_rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::movement::config::MovementConfig;

    const EXTENTS: Vec3 = Vec3::new(0.8, 1.8, 0.8);

    fn body_with_feet_at(feet: f32) -> Aabb {
        Aabb::from_center_extents(Vec3::new(0.0, feet + EXTENTS.y * 0.5, 0.0), EXTENTS)
    }

    fn world_with(obstacles: Vec<Aabb>) -> World {
        World::new(&MovementConfig::default(), 0.0, obstacles)
    }

    #[test]
    fn resting_on_ground_plane_is_grounded() {
        let world = world_with(Vec::new());
        assert!(grounded_next_frame(&world, &body_with_feet_at(1e-4), -0.0065));
    }

    #[test]
    fn resting_on_obstacle_is_grounded() {
        let platform = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let world = world_with(vec![platform]);
        assert!(grounded_next_frame(&world, &body_with_feet_at(1.0 + 1e-4), -0.0065));
    }

    #[test]
    fn high_in_the_air_is_not_grounded() {
        let world = world_with(Vec::new());
        assert!(!grounded_next_frame(&world, &body_with_feet_at(3.0), -0.0065));
    }

    #[test]
    fn rising_body_is_never_grounded() {
        let world = world_with(Vec::new());
        assert!(!grounded_next_frame(&world, &body_with_feet_at(1e-4), 0.1));
    }

    #[test]
    fn probe_reaches_at_least_two_precisions_down() {
        let mut world = world_with(Vec::new());
        world.set_frame_delta(0.0);
        assert_eq!(ground_probe_offset(&world, 0.0), Some(-2e-4));
        world.set_frame_delta(1.0);
        assert_eq!(ground_probe_offset(&world, -0.5), Some(-0.5));
    }

    #[test]
    fn gravity_is_applied_every_tick() {
        let world = world_with(Vec::new());
        let step = integrate_vertical(
            &world,
            &body_with_feet_at(5.0),
            -0.1,
            0.15,
            false,
            &InputSnapshot::empty(),
        );
        assert!((step.velocity + 0.1065).abs() < 1e-6);
        assert!(!step.was_at_rest);
        assert!(!step.jumped);
    }

    #[test]
    fn jump_starts_from_rest_on_ground() {
        let world = world_with(Vec::new());
        let input = InputSnapshot::from_actions(&[InputAction::Jump]);
        let step = integrate_vertical(&world, &body_with_feet_at(1e-4), 0.0, 0.15, false, &input);
        assert!(step.jumped);
        assert_eq!(step.velocity, 0.15);
    }

    #[test]
    fn jump_is_refused_while_crouching_airborne_or_moving() {
        let world = world_with(Vec::new());
        let input = InputSnapshot::from_actions(&[InputAction::Jump]);

        let crouched = integrate_vertical(&world, &body_with_feet_at(1e-4), 0.0, 0.15, true, &input);
        assert!(!crouched.jumped);

        let airborne = integrate_vertical(&world, &body_with_feet_at(2.0), 0.0, 0.15, false, &input);
        assert!(!airborne.jumped);

        let falling = integrate_vertical(&world, &body_with_feet_at(1e-4), -0.05, 0.15, false, &input);
        assert!(!falling.jumped);
        assert!(falling.grounded_next_frame);
    }
}
