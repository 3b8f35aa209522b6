use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Crouch,
    Sprint,
}

const ACTION_COUNT: usize = 7;

/// Directional actions in the order they are scanned when recording the
/// last pressed direction. Later entries win when several are held.
pub const DIRECTIONAL_ACTIONS: [InputAction; 4] = [
    InputAction::Forward,
    InputAction::Backward,
    InputAction::Left,
    InputAction::Right,
];

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::Forward => 0,
            InputAction::Backward => 1,
            InputAction::Left => 2,
            InputAction::Right => 3,
            InputAction::Jump => 4,
            InputAction::Crouch => 5,
            InputAction::Sprint => 6,
        }
    }

    pub const fn is_directional(self) -> bool {
        matches!(
            self,
            InputAction::Forward | InputAction::Backward | InputAction::Left | InputAction::Right
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

/// Raw look input for one tick, before sensitivity is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LookDelta {
    pub yaw: f32,
    pub pitch: f32,
}

/// Immutable record of the controls for one tick.
///
/// Built by whatever polls the OS (or replays a script) and handed to the
/// movement tick by reference; the core never polls devices itself.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    actions: ActionStates,
    look_delta: LookDelta,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(actions: ActionStates, look_delta: LookDelta) -> Self {
        Self {
            actions,
            look_delta,
        }
    }

    pub fn from_actions(actions: &[InputAction]) -> Self {
        let mut snapshot = Self::empty();
        for action in actions {
            snapshot = snapshot.with_action_down(*action, true);
        }
        snapshot
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn any_directional_down(&self) -> bool {
        DIRECTIONAL_ACTIONS
            .iter()
            .any(|action| self.actions.is_down(*action))
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_look_delta(mut self, look_delta: LookDelta) -> Self {
        self.look_delta = look_delta;
        self
    }

    pub fn look_delta(&self) -> LookDelta {
        self.look_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_nothing_down() {
        let snapshot = InputSnapshot::empty();
        assert!(!snapshot.any_directional_down());
        assert!(!snapshot.is_down(InputAction::Jump));
        assert_eq!(snapshot.look_delta(), LookDelta::default());
    }

    #[test]
    fn builder_sets_and_clears_actions() {
        let snapshot = InputSnapshot::from_actions(&[InputAction::Sprint, InputAction::Left])
            .with_action_down(InputAction::Sprint, false);
        assert!(!snapshot.is_down(InputAction::Sprint));
        assert!(snapshot.is_down(InputAction::Left));
        assert!(snapshot.any_directional_down());
    }

    #[test]
    fn jump_crouch_sprint_are_not_directional() {
        let snapshot = InputSnapshot::from_actions(&[
            InputAction::Jump,
            InputAction::Crouch,
            InputAction::Sprint,
        ]);
        assert!(!snapshot.any_directional_down());
        assert!(InputAction::Right.is_directional());
        assert!(!InputAction::Jump.is_directional());
    }

    #[test]
    fn actions_deserialize_from_names() {
        let actions: Vec<InputAction> =
            serde_json::from_str(r#"["Forward", "Crouch"]"#).expect("parse actions");
        assert_eq!(actions, vec![InputAction::Forward, InputAction::Crouch]);
    }
}
