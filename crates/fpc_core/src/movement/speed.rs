use super::character::SpeedProfile;

/// Which ceiling the horizontal speed ramps toward this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedCeiling {
    Crouch,
    Normal,
    Sprint,
}

impl SpeedCeiling {
    /// Crouching caps everything; sprint needs the sprint action and ground
    /// under the feet next frame.
    pub fn select(crouching: bool, sprint_down: bool, grounded_next_frame: bool) -> Self {
        if crouching {
            SpeedCeiling::Crouch
        } else if sprint_down && grounded_next_frame {
            SpeedCeiling::Sprint
        } else {
            SpeedCeiling::Normal
        }
    }

    pub fn value(self, profile: &SpeedProfile) -> f32 {
        match self {
            SpeedCeiling::Crouch => profile.crouch,
            SpeedCeiling::Normal => profile.normal,
            SpeedCeiling::Sprint => profile.sprint,
        }
    }
}

/// Moves `profile.current` one tick toward its target and returns the new
/// value.
///
/// Without directional input the target is 0. Otherwise it is the selected
/// ceiling: speed above it decays toward it, speed below grows toward it,
/// both by `acceleration * dt` and never overshooting.
pub fn ramp_speed(
    profile: &SpeedProfile,
    ceiling: SpeedCeiling,
    directional_active: bool,
    dt: f32,
) -> f32 {
    let step = profile.acceleration * dt;
    let current = profile.current;
    let next = if !directional_active {
        (current - step).max(0.0)
    } else {
        let cap = ceiling.value(profile);
        if current > cap {
            (current - step).max(cap)
        } else {
            (current + step).min(cap)
        }
    };
    next.clamp(0.0, profile.max_ceiling())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(current: f32) -> SpeedProfile {
        SpeedProfile {
            current,
            normal: 0.1,
            sprint: 0.15,
            crouch: 0.05,
            acceleration: 0.01,
        }
    }

    #[test]
    fn crouch_dominates_sprint() {
        assert_eq!(SpeedCeiling::select(true, true, true), SpeedCeiling::Crouch);
        assert_eq!(SpeedCeiling::select(false, true, true), SpeedCeiling::Sprint);
    }

    #[test]
    fn sprint_requires_ground() {
        assert_eq!(SpeedCeiling::select(false, true, false), SpeedCeiling::Normal);
        assert_eq!(SpeedCeiling::select(false, false, true), SpeedCeiling::Normal);
    }

    #[test]
    fn accelerates_up_to_ceiling_without_overshoot() {
        let next = ramp_speed(&profile(0.095), SpeedCeiling::Normal, true, 1.0);
        assert_eq!(next, 0.1);
        let next = ramp_speed(&profile(0.0), SpeedCeiling::Normal, true, 1.0);
        assert!((next - 0.01).abs() < 1e-7);
    }

    #[test]
    fn decays_toward_lower_ceiling_but_not_below_it() {
        let next = ramp_speed(&profile(0.15), SpeedCeiling::Normal, true, 1.0);
        assert!((next - 0.14).abs() < 1e-6);
        let next = ramp_speed(&profile(0.104), SpeedCeiling::Normal, true, 1.0);
        assert_eq!(next, 0.1);
    }

    #[test]
    fn releases_decay_to_zero_and_clamp() {
        let next = ramp_speed(&profile(0.004), SpeedCeiling::Sprint, false, 1.0);
        assert_eq!(next, 0.0);
        let next = ramp_speed(&profile(0.0), SpeedCeiling::Sprint, false, 1.0);
        assert_eq!(next, 0.0);
    }

    #[test]
    fn zero_delta_holds_speed() {
        let next = ramp_speed(&profile(0.07), SpeedCeiling::Sprint, true, 0.0);
        assert_eq!(next, 0.07);
    }
}
