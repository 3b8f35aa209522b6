use crate::geometry::Aabb;
use crate::input::InputAction;
use crate::math::Vec3;

use super::config::{LookConfig, MovementConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

/// Look angles in radians. Yaw 0 faces -X; pitch is clamped by
/// [`Rotation::apply_look_delta`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub fn apply_look_delta(self, yaw_delta: f32, pitch_delta: f32, look: &LookConfig) -> Self {
        let yaw = self.yaw + finite_or_zero(yaw_delta) * look.sensitivity;
        let pitch = (self.pitch - finite_or_zero(pitch_delta) * look.sensitivity)
            .clamp(-look.pitch_limit, look.pitch_limit);
        Self { yaw, pitch }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Current horizontal speed plus the ceilings it ramps toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedProfile {
    pub current: f32,
    pub normal: f32,
    pub sprint: f32,
    pub crouch: f32,
    pub acceleration: f32,
}

impl SpeedProfile {
    pub fn max_ceiling(&self) -> f32 {
        self.normal.max(self.sprint).max(self.crouch)
    }
}

/// The simulated body.
///
/// `position` is the body center; the committed bounding box is always
/// `position ± scale / 2`. Fields are only written through the tick, which
/// builds the next value from the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    position: Vec3,
    scale: Vec3,
    standing_height: f32,
    crouch_height: f32,
    bounding_box: Aabb,
    rotation: Rotation,
    look: LookConfig,
    vertical_velocity: f32,
    jump_impulse: f32,
    speed: SpeedProfile,
    stance: Stance,
    last_directional_action: Option<InputAction>,
    stepped: bool,
}

impl Character {
    pub fn new(config: &MovementConfig, position: Vec3) -> Self {
        let scale = Vec3::new(config.body.width, config.body.height, config.body.depth);
        Self {
            position,
            scale,
            standing_height: config.body.height,
            crouch_height: config.body.crouch_height,
            bounding_box: Aabb::from_center_extents(position, scale),
            rotation: Rotation::default(),
            look: config.look,
            vertical_velocity: 0.0,
            jump_impulse: config.jump_impulse,
            speed: SpeedProfile {
                current: 0.0,
                normal: config.speed.normal,
                sprint: config.speed.sprint,
                crouch: config.speed.crouch,
                acceleration: config.speed.acceleration,
            },
            stance: Stance::Standing,
            last_directional_action: None,
            stepped: false,
        }
    }

    /// Places a standing character so its feet rest on `floor_height`.
    pub fn standing_on(config: &MovementConfig, x: f32, floor_height: f32, z: f32) -> Self {
        let y = floor_height + config.float_precision + config.body.height * 0.5;
        Self::new(config, Vec3::new(x, y, z))
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_vertical_velocity(mut self, vertical_velocity: f32) -> Self {
        self.vertical_velocity = vertical_velocity;
        self
    }

    pub fn with_current_speed(mut self, current: f32) -> Self {
        self.speed.current = current.clamp(0.0, self.speed.max_ceiling());
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn jump_impulse(&self) -> f32 {
        self.jump_impulse
    }

    pub fn speed(&self) -> SpeedProfile {
        self.speed
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.speed.current
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn is_crouching(&self) -> bool {
        self.stance == Stance::Crouching
    }

    pub fn last_directional_action(&self) -> Option<InputAction> {
        self.last_directional_action
    }

    /// True when the last tick converted a blocked move into a step up.
    pub fn stepped(&self) -> bool {
        self.stepped
    }

    pub fn standing_height(&self) -> f32 {
        self.standing_height
    }

    pub fn crouch_height(&self) -> f32 {
        self.crouch_height
    }

    pub fn look_config(&self) -> &LookConfig {
        &self.look
    }

    /// Half of the height difference between standing and crouching; the
    /// center moves by this much so the feet stay put.
    pub fn crouch_offset(&self) -> f32 {
        (self.standing_height - self.crouch_height) * 0.5
    }

    /// Top-center of the body, where a first-person camera sits.
    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + self.scale.y * 0.5,
            self.position.z,
        )
    }

    /// Unit view direction implied by yaw and pitch.
    pub fn look_direction(&self) -> Vec3 {
        let cos_pitch = self.rotation.pitch.cos();
        Vec3::new(
            -self.rotation.yaw.cos() * cos_pitch,
            self.rotation.pitch.sin(),
            -self.rotation.yaw.sin() * cos_pitch,
        )
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.bounding_box = Aabb::from_center_extents(position, self.scale);
    }

    pub(crate) fn set_stance(&mut self, stance: Stance) {
        self.stance = stance;
        self.scale.y = match stance {
            Stance::Standing => self.standing_height,
            Stance::Crouching => self.crouch_height,
        };
        self.bounding_box = Aabb::from_center_extents(self.position, self.scale);
    }

    pub(crate) fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub(crate) fn set_vertical_velocity(&mut self, vertical_velocity: f32) {
        self.vertical_velocity = vertical_velocity;
    }

    pub(crate) fn set_current_speed(&mut self, current: f32) {
        self.speed.current = current;
    }

    pub(crate) fn set_last_directional_action(&mut self, action: Option<InputAction>) {
        self.last_directional_action = action;
    }

    pub(crate) fn set_stepped(&mut self, stepped: bool) {
        self.stepped = stepped;
    }
}
