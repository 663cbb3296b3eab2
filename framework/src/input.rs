use std::collections::HashSet;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton},
    keyboard::KeyCode,
};

/// Snapshot of the keyboard and mouse as seen by the current frame.
///
/// Window events are folded into this state as they arrive; renderers only
/// ever poll it once per frame.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pressed_keys: HashSet<KeyCode>,
    /// key presses nobody has consumed yet; dropped once the key is released
    pending_presses: HashSet<KeyCode>,
    pressed_buttons: HashSet<MouseButton>,
    cursor_position: Option<PhysicalPosition<f64>>,
    previous_cursor_position: Option<PhysicalPosition<f64>>,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // auto-repeated presses of a held key don't count as new
                if self.pressed_keys.insert(key) {
                    self.pending_presses.insert(key);
                }
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key);
            }
        }
    }

    pub fn set_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => self.pressed_buttons.insert(button),
            ElementState::Released => self.pressed_buttons.remove(&button),
        };
    }

    pub fn move_cursor(&mut self, position: PhysicalPosition<f64>) {
        self.cursor_position = Some(position);
    }

    /// Forget everything that is held down, e.g. because the window lost focus
    /// and release events will never arrive.
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pending_presses.clear();
        self.pressed_buttons.clear();
    }

    /// Remember the current cursor position as the previous one for the next frame
    /// and drop the pending presses of keys which are no longer held.
    pub fn end_frame(&mut self) {
        self.previous_cursor_position = self.cursor_position;
        let pressed_keys = &self.pressed_keys;
        self.pending_presses.retain(|key| pressed_keys.contains(key));
    }

    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Whether `key` went down and this press has not been consumed yet.
    ///
    /// A press stays pending while the key is held, and for the rest of the frame
    /// if it is released before the frame got to see it.
    #[must_use]
    pub fn has_pending_press(&self, key: KeyCode) -> bool {
        self.pending_presses.contains(&key)
    }

    /// Mark the current press of `key` as handled; the key needs to go down again
    /// before it is pending once more.
    pub fn consume_press(&mut self, key: KeyCode) {
        self.pending_presses.remove(&key);
    }

    #[must_use]
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    #[must_use]
    pub fn cursor_position(&self) -> Option<PhysicalPosition<f64>> {
        self.cursor_position
    }

    #[must_use]
    pub fn previous_cursor_position(&self) -> Option<PhysicalPosition<f64>> {
        self.previous_cursor_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_held_until_released() {
        let mut input = InputState::new();
        input.set_key(KeyCode::KeyW, ElementState::Pressed);
        // key repeat delivers more presses
        input.set_key(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyW), "W should be held");
        assert!(!input.is_key_pressed(KeyCode::KeyS), "S was never pressed");

        input.set_key(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_key_pressed(KeyCode::KeyW), "W was released");
    }

    #[test]
    fn presses_stay_pending_until_consumed() {
        let mut input = InputState::new();
        input.set_key(KeyCode::Digit1, ElementState::Pressed);
        assert!(input.has_pending_press(KeyCode::Digit1), "fresh press");

        input.end_frame();
        assert!(input.has_pending_press(KeyCode::Digit1), "held and not consumed");

        input.consume_press(KeyCode::Digit1);
        input.set_key(KeyCode::Digit1, ElementState::Pressed);
        assert!(
            !input.has_pending_press(KeyCode::Digit1),
            "auto-repeat is not a new press"
        );
        assert!(input.is_key_pressed(KeyCode::Digit1), "still held");

        input.set_key(KeyCode::Digit1, ElementState::Released);
        input.set_key(KeyCode::Digit1, ElementState::Pressed);
        assert!(input.has_pending_press(KeyCode::Digit1), "pressed again");
    }

    #[test]
    fn released_presses_survive_until_the_end_of_the_frame() {
        let mut input = InputState::new();
        input.set_key(KeyCode::Digit2, ElementState::Pressed);
        input.set_key(KeyCode::Digit2, ElementState::Released);
        assert!(input.has_pending_press(KeyCode::Digit2), "short tap");

        input.end_frame();
        assert!(!input.has_pending_press(KeyCode::Digit2), "tap was not consumed in time");
    }

    #[test]
    fn release_all_clears_keys_and_buttons() {
        let mut input = InputState::new();
        input.set_key(KeyCode::ArrowLeft, ElementState::Pressed);
        input.set_mouse_button(MouseButton::Right, ElementState::Pressed);
        input.release_all();
        assert!(!input.is_key_pressed(KeyCode::ArrowLeft), "key still held");
        assert!(
            !input.is_mouse_button_pressed(MouseButton::Right),
            "button still held"
        );
    }

    #[test]
    fn previous_cursor_lags_one_frame_behind() {
        let mut input = InputState::new();
        assert_eq!(input.cursor_position(), None);

        input.move_cursor(PhysicalPosition::new(10.0, 20.0));
        assert_eq!(input.previous_cursor_position(), None);
        input.end_frame();

        input.move_cursor(PhysicalPosition::new(11.0, 25.0));
        input.move_cursor(PhysicalPosition::new(12.0, 30.0));
        assert_eq!(
            input.previous_cursor_position(),
            Some(PhysicalPosition::new(10.0, 20.0))
        );
        assert_eq!(
            input.cursor_position(),
            Some(PhysicalPosition::new(12.0, 30.0))
        );
    }
}
