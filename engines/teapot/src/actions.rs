use serde::{Deserialize, Serialize};
use teapot_framework::InputState;
use winit::keyboard::KeyCode;

/// A discrete change of the scene triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Terminate,
    Reset,
    IncreaseRotationDelta,
    DecreaseRotationDelta,
    OrbitLeft,
    OrbitRight,
    OrbitUp,
    OrbitDown,
    Light0RotateUp,
    Light0RotateLeft,
    Light0Roll,
    Light1RotateUp,
    Light1RotateLeft,
    Light1Roll,
    DollyForward,
    DollyBackward,
    PanLeft,
    PanRight,
    ToggleLight0,
    ToggleLight1,
}

impl Action {
    /// Whether holding the key down repeats the action every frame.
    ///
    /// Toggles only fire once per key press, anything else would make the light flicker.
    #[must_use]
    pub fn repeats(self) -> bool {
        !matches!(self, Self::ToggleLight0 | Self::ToggleLight1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub action: Action,
}

impl KeyBinding {
    #[must_use]
    pub const fn new(key: KeyCode, action: Action) -> Self {
        Self { key, action }
    }
}

const DEFAULT_BINDINGS: [KeyBinding; 24] = [
    KeyBinding::new(KeyCode::KeyQ, Action::Terminate),
    KeyBinding::new(KeyCode::Equal, Action::IncreaseRotationDelta),
    KeyBinding::new(KeyCode::Minus, Action::DecreaseRotationDelta),
    KeyBinding::new(KeyCode::KeyR, Action::Reset),
    KeyBinding::new(KeyCode::ArrowLeft, Action::OrbitRight),
    KeyBinding::new(KeyCode::ArrowRight, Action::OrbitLeft),
    KeyBinding::new(KeyCode::ArrowUp, Action::OrbitDown),
    KeyBinding::new(KeyCode::ArrowDown, Action::OrbitUp),
    // W and S (as well as A and D, ...) intentionally trigger the same action
    KeyBinding::new(KeyCode::KeyW, Action::Light0RotateUp),
    KeyBinding::new(KeyCode::KeyS, Action::Light0RotateUp),
    KeyBinding::new(KeyCode::KeyA, Action::Light0RotateLeft),
    KeyBinding::new(KeyCode::KeyD, Action::Light0RotateLeft),
    KeyBinding::new(KeyCode::KeyX, Action::Light0Roll),
    KeyBinding::new(KeyCode::KeyY, Action::Light1RotateUp),
    KeyBinding::new(KeyCode::KeyH, Action::Light1RotateUp),
    KeyBinding::new(KeyCode::KeyG, Action::Light1RotateLeft),
    KeyBinding::new(KeyCode::KeyJ, Action::Light1RotateLeft),
    KeyBinding::new(KeyCode::KeyN, Action::Light1Roll),
    KeyBinding::new(KeyCode::KeyO, Action::DollyForward),
    KeyBinding::new(KeyCode::KeyL, Action::DollyBackward),
    KeyBinding::new(KeyCode::KeyK, Action::PanLeft),
    KeyBinding::new(KeyCode::Semicolon, Action::PanRight),
    KeyBinding::new(KeyCode::Digit1, Action::ToggleLight0),
    KeyBinding::new(KeyCode::Digit2, Action::ToggleLight1),
];

/// Ordered key to action table; earlier entries take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
}

impl KeyBindings {
    #[must_use]
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    #[must_use]
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// The action of the first binding whose key is active in this frame.
    ///
    /// Held keys count for repeating actions only, the others need a pending key press.
    #[must_use]
    pub fn action_for(&self, input: &InputState) -> Option<Action> {
        self.active_binding(input).map(|binding| binding.action)
    }

    /// Like [`Self::action_for`], but consumes the key press of a non-repeating action.
    ///
    /// Presses of other keys stay pending, so a toggle pressed while a binding
    /// with higher priority is held fires as soon as that key is let go.
    pub fn take_action(&self, input: &mut InputState) -> Option<Action> {
        let binding = self.active_binding(input)?;
        if !binding.action.repeats() {
            input.consume_press(binding.key);
        }
        Some(binding.action)
    }

    fn active_binding(&self, input: &InputState) -> Option<&KeyBinding> {
        self.bindings.iter().find(|binding| {
            if binding.action.repeats() {
                input.is_key_pressed(binding.key)
            } else {
                input.has_pending_press(binding.key)
            }
        })
    }

    /// All keys bound to `action`, in table order.
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |binding| binding.action == action)
            .map(|binding| binding.key)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(DEFAULT_BINDINGS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;

    fn holding(keys: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for &key in keys {
            input.set_key(key, ElementState::Pressed);
        }
        input
    }

    #[test]
    fn default_bindings_resolve_to_documented_actions() {
        let bindings = KeyBindings::default();
        let expected = [
            (KeyCode::KeyQ, Action::Terminate),
            (KeyCode::Equal, Action::IncreaseRotationDelta),
            (KeyCode::Minus, Action::DecreaseRotationDelta),
            (KeyCode::KeyR, Action::Reset),
            (KeyCode::ArrowLeft, Action::OrbitRight),
            (KeyCode::ArrowRight, Action::OrbitLeft),
            (KeyCode::ArrowUp, Action::OrbitDown),
            (KeyCode::ArrowDown, Action::OrbitUp),
            (KeyCode::KeyW, Action::Light0RotateUp),
            (KeyCode::KeyS, Action::Light0RotateUp),
            (KeyCode::KeyA, Action::Light0RotateLeft),
            (KeyCode::KeyD, Action::Light0RotateLeft),
            (KeyCode::KeyX, Action::Light0Roll),
            (KeyCode::KeyY, Action::Light1RotateUp),
            (KeyCode::KeyH, Action::Light1RotateUp),
            (KeyCode::KeyG, Action::Light1RotateLeft),
            (KeyCode::KeyJ, Action::Light1RotateLeft),
            (KeyCode::KeyN, Action::Light1Roll),
            (KeyCode::KeyO, Action::DollyForward),
            (KeyCode::KeyL, Action::DollyBackward),
            (KeyCode::KeyK, Action::PanLeft),
            (KeyCode::Semicolon, Action::PanRight),
            (KeyCode::Digit1, Action::ToggleLight0),
            (KeyCode::Digit2, Action::ToggleLight1),
        ];

        for (key, action) in expected {
            assert_eq!(
                bindings.action_for(&holding(&[key])),
                Some(action),
                "wrong action for {key:?}"
            );
        }
    }

    #[test]
    fn nothing_pressed_means_no_action() {
        assert_eq!(KeyBindings::default().action_for(&InputState::new()), None);
        assert_eq!(
            KeyBindings::default().action_for(&holding(&[KeyCode::KeyZ])),
            None
        );
    }

    #[test]
    fn first_held_key_in_table_order_wins() {
        let bindings = KeyBindings::default();
        // Q comes first even though it was pressed last
        let input = holding(&[KeyCode::KeyO, KeyCode::ArrowLeft, KeyCode::KeyQ]);
        assert_eq!(bindings.action_for(&input), Some(Action::Terminate));

        let input = holding(&[KeyCode::KeyO, KeyCode::ArrowLeft]);
        assert_eq!(bindings.action_for(&input), Some(Action::OrbitRight));
    }

    #[test]
    fn held_keys_repeat_but_toggles_do_not() {
        let bindings = KeyBindings::default();
        let mut input = holding(&[KeyCode::KeyW]);
        assert_eq!(bindings.take_action(&mut input), Some(Action::Light0RotateUp));
        input.end_frame();
        assert_eq!(bindings.take_action(&mut input), Some(Action::Light0RotateUp));

        let mut input = holding(&[KeyCode::Digit1]);
        assert_eq!(bindings.take_action(&mut input), Some(Action::ToggleLight0));
        input.end_frame();
        assert_eq!(bindings.take_action(&mut input), None);
    }

    #[test]
    fn toggle_fires_once_a_higher_priority_key_is_released() {
        let bindings = KeyBindings::default();
        let mut input = holding(&[KeyCode::KeyW, KeyCode::Digit1]);
        assert_eq!(bindings.take_action(&mut input), Some(Action::Light0RotateUp));
        input.end_frame();

        input.set_key(KeyCode::KeyW, ElementState::Released);
        assert_eq!(bindings.take_action(&mut input), Some(Action::ToggleLight0));
        input.end_frame();

        // 1 is still held, but its press has been used up
        assert_eq!(bindings.take_action(&mut input), None);
    }

    #[test]
    fn toggle_released_while_shadowed_is_dropped() {
        let bindings = KeyBindings::default();
        let mut input = holding(&[KeyCode::KeyW, KeyCode::Digit2]);
        assert_eq!(bindings.take_action(&mut input), Some(Action::Light0RotateUp));
        input.set_key(KeyCode::Digit2, ElementState::Released);
        input.end_frame();

        input.set_key(KeyCode::KeyW, ElementState::Released);
        assert_eq!(bindings.take_action(&mut input), None);
    }

    #[test]
    fn duplicate_keys_share_an_action() {
        let bindings = KeyBindings::default();
        let keys: Vec<_> = bindings.keys_for(Action::Light0RotateUp).collect();
        assert_eq!(keys, [KeyCode::KeyW, KeyCode::KeyS]);
    }

    #[test]
    fn bindings_deserialize_from_key_names() {
        let bindings: Vec<KeyBinding> =
            serde_json::from_str(r#"[{ "key": "KeyS", "action": "Light0RotateLeft" }]"#)
                .expect("valid binding");
        let bindings = KeyBindings::new(bindings);
        assert_eq!(
            bindings.action_for(&holding(&[KeyCode::KeyS])),
            Some(Action::Light0RotateLeft)
        );
        assert_eq!(bindings.action_for(&holding(&[KeyCode::KeyW])), None);
    }
}
