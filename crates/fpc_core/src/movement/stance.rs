use tracing::debug;

use crate::geometry::Aabb;
use crate::math::{PlanarVec, Vec3};

use super::character::{Character, Stance};
use super::world::World;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceTransition {
    pub stance: Stance,
    pub position: Vec3,
    pub changed: bool,
}

impl StanceTransition {
    fn unchanged(character: &Character) -> Self {
        Self {
            stance: character.stance(),
            position: character.position(),
            changed: false,
        }
    }
}

/// Whether a standing body could occupy `standing` now and after the
/// `horizontal` move. Obstacles whose top is at or below the feet (plus the
/// float precision) are supports, not ceilings, and never block.
pub fn headroom_clear(world: &World, standing: &Aabb, horizontal: PlanarVec) -> bool {
    let floor = standing.min.y + world.float_precision();
    let ceiling_hit = |probe: Aabb| {
        world
            .overlapping(probe)
            .any(|(_, obstacle)| obstacle.max.y > floor)
    };
    !ceiling_hit(*standing) && !ceiling_hit(standing.translated(horizontal.to_vec3(0.0)))
}

/// Crouch/stand state machine.
///
/// Holding crouch always crouches. Releasing it stands the body back up only
/// when the full standing box has headroom; otherwise the body stays
/// crouched until a later tick finds room.
pub fn transition_stance(
    world: &World,
    character: &Character,
    crouch_down: bool,
    horizontal: PlanarVec,
) -> StanceTransition {
    let offset = character.crouch_offset();
    let position = character.position();

    match (character.stance(), crouch_down) {
        (Stance::Standing, true) => StanceTransition {
            stance: Stance::Crouching,
            position: position.with_y(position.y - offset),
            changed: true,
        },
        (Stance::Crouching, false) => {
            let raised = position.with_y(position.y + offset);
            let scale = character.scale();
            let standing = Aabb::from_center_extents(
                raised,
                Vec3::new(scale.x, character.standing_height(), scale.z),
            );
            if headroom_clear(world, &standing, horizontal) {
                StanceTransition {
                    stance: Stance::Standing,
                    position: raised,
                    changed: true,
                }
            } else {
                debug!(
                    x = position.x,
                    y = position.y,
                    z = position.z,
                    "stand_up_blocked"
                );
                StanceTransition::unchanged(character)
            }
        }
        _ => StanceTransition::unchanged(character),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::config::MovementConfig;

    fn overhang() -> Aabb {
        Aabb::new(Vec3::new(-2.0, 1.2, -2.0), Vec3::new(2.0, 2.0, 2.0))
    }

    fn crouched_at(config: &MovementConfig, x: f32) -> Character {
        let mut character = Character::standing_on(config, x, 0.0, 0.0);
        character.set_stance(Stance::Crouching);
        let offset = character.crouch_offset();
        let position = character.position();
        character.set_position(position.with_y(position.y - offset));
        character
    }

    #[test]
    fn holding_crouch_lowers_center_and_keeps_feet() {
        let config = MovementConfig::default();
        let world = World::new(&config, 0.0, Vec::new());
        let character = Character::standing_on(&config, 0.0, 0.0, 0.0);

        let transition = transition_stance(&world, &character, true, PlanarVec::ZERO);
        assert!(transition.changed);
        assert_eq!(transition.stance, Stance::Crouching);
        let feet = transition.position.y - config.body.crouch_height * 0.5;
        assert!((feet - character.bounding_box().min.y).abs() < 1e-6);
    }

    #[test]
    fn release_under_overhang_stays_crouched() {
        let config = MovementConfig::default();
        let world = World::new(&config, 0.0, vec![overhang()]);
        let character = crouched_at(&config, 0.0);

        let transition = transition_stance(&world, &character, false, PlanarVec::ZERO);
        assert!(!transition.changed);
        assert_eq!(transition.stance, Stance::Crouching);
        assert_eq!(transition.position, character.position());
    }

    #[test]
    fn release_in_the_open_stands_up() {
        let config = MovementConfig::default();
        let world = World::new(&config, 0.0, vec![overhang()]);
        let character = crouched_at(&config, 5.0);

        let transition = transition_stance(&world, &character, false, PlanarVec::ZERO);
        assert!(transition.changed);
        assert_eq!(transition.stance, Stance::Standing);
        assert!((transition.position.y - character.position().y - 0.45).abs() < 1e-6);
    }

    #[test]
    fn moving_under_an_overhang_refuses_to_stand() {
        let config = MovementConfig::default();
        let world = World::new(&config, 0.0, vec![overhang()]);
        let character = crouched_at(&config, 2.45);

        let transition = transition_stance(&world, &character, false, PlanarVec::new(-0.1, 0.0));
        assert_eq!(transition.stance, Stance::Crouching);
    }

    #[test]
    fn flush_supporting_slab_does_not_count_as_a_ceiling() {
        let config = MovementConfig::default();
        let floor_slab = Aabb::new(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        let world = World::new(&config, -1.0, vec![floor_slab]);
        let mut character = crouched_at(&config, 0.0);
        character.set_position(Vec3::new(0.0, config.body.crouch_height * 0.5, 0.0));
        assert!(character.bounding_box().intersects(&floor_slab));

        let transition = transition_stance(&world, &character, false, PlanarVec::ZERO);
        assert_eq!(transition.stance, Stance::Standing);
    }
}
