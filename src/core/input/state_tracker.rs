//=========================================================================
// State Tracker
//=========================================================================
//
// Persistent input state derived from the event stream.
//
// Architecture:
//   InputEvent → process_event() → held keys/buttons + cursor → query
//
// Screens receive events directly; the tracker answers the questions
// events alone cannot, such as "where is the cursor right now" when a
// click arrives or when hover state is computed during update().
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};
use crate::core::render::Vec2;

//=== StateTracker ========================================================

/// Tracks held keys, held mouse buttons, the cursor and modifiers.
pub struct StateTracker {
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: Vec2,
    modifiers: Modifiers,
}

impl StateTracker {
    /// Creates a new state tracker with empty state.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: Vec2::ZERO,
            modifiers: Modifiers::NONE,
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Folds one event into the tracked state.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys_down.insert(*key);
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys_down.remove(key);
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                self.mouse_buttons_down.insert(*button);
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                self.mouse_buttons_down.remove(button);
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = Vec2::new(*x, *y);
            }

            InputEvent::Text(_) | InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Returns the cursor position in window pixels (top-left origin).
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Returns the most recently reported modifier state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_persists_until_released() {
        let mut tracker = StateTracker::new();

        tracker.process_event(&InputEvent::key_down(KeyCode::KeyW));
        assert!(tracker.is_key_down(KeyCode::KeyW));

        tracker.process_event(&InputEvent::KeyUp { key: KeyCode::KeyW, modifiers: Modifiers::NONE });
        assert!(!tracker.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn cursor_follows_last_move() {
        let mut tracker = StateTracker::new();
        tracker.process_event(&InputEvent::MouseMoved { x: 10.0, y: 20.0 });
        tracker.process_event(&InputEvent::MouseMoved { x: 30.0, y: 40.0 });

        assert_eq!(tracker.mouse_position(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn buttons_and_modifiers_are_tracked() {
        let mut tracker = StateTracker::new();
        tracker.process_event(&InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::SHIFT,
        });

        assert!(tracker.is_button_down(MouseButton::Left));
        assert!(tracker.modifiers().shift);

        tracker.process_event(&InputEvent::MouseButtonUp {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });
        assert!(!tracker.is_button_down(MouseButton::Left));
        assert!(!tracker.modifiers().shift);
    }

    #[test]
    fn text_events_leave_state_untouched() {
        let mut tracker = StateTracker::new();
        tracker.process_event(&InputEvent::Text('q'));

        assert!(!tracker.is_key_down(KeyCode::KeyQ));
        assert_eq!(tracker.mouse_position(), Vec2::ZERO);
    }
}
