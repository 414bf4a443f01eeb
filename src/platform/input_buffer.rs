//=========================================================================
// Input Buffer
//
// Holds one frame of converted input until the frame boundary.
//
// Two lanes:
// - `discrete`: key presses, button clicks, typed text, in arrival order
// - `continuous`: cursor motion, coalesced so only the latest position
//   survives (InputEvent hashes every MouseMoved alike)
//
// `drain()` yields the cursor position first so clicks in the same frame
// hit-test against where the pointer actually is.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Transient event store for one frame of input.
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest cursor position replaces any earlier one this frame.
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Back-to-back identical key/button events (OS key repeat within one
    // frame) collapse into one. Typed text is kept verbatim.
    //
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        let is_text = matches!(event, InputEvent::Text(_));
        if is_text || self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events (cursor first) and empties the buffer,
    // keeping its capacity.
    //
    pub(crate) fn drain(&mut self) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = self.continuous.drain().collect();
        events.append(&mut self.discrete);
        events
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    #[test]
    fn test_discrete_deduplication() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::key_down(KeyCode::KeyA));
        buffer.push_discrete(InputEvent::key_down(KeyCode::KeyA));
        buffer.push_discrete(InputEvent::key_down(KeyCode::KeyB));
        assert_eq!(buffer.discrete.len(), 2, "Repeats should collapse");
    }

    #[test]
    fn test_text_is_never_collapsed() {
        let mut buffer = InputBuffer::new();
        for c in "moon".chars() {
            buffer.push_discrete(InputEvent::Text(c));
        }
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_continuous_overwrite() {
        let mut buffer = InputBuffer::new();

        buffer.push_continuous(mouse_move(10.0, 10.0));
        buffer.push_continuous(mouse_move(20.0, 30.0));

        assert_eq!(buffer.continuous.len(), 1, "Only the latest position is kept");

        let event = buffer.continuous.iter().next().unwrap();
        if let InputEvent::MouseMoved { x, y } = event {
            assert_eq!((*x, *y), (20.0, 30.0));
        } else {
            panic!("Expected MouseMoved event, found {:?}", event);
        }
    }

    #[test]
    fn test_drain_puts_cursor_first_and_clears() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::left_click());
        buffer.push_discrete(InputEvent::Text('x'));
        buffer.push_continuous(mouse_move(5.0, 5.0));

        let events = buffer.drain();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], InputEvent::MouseMoved { .. }));
        assert!(events[1].is_left_click());
        assert_eq!(events[2], InputEvent::Text('x'));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_keeps_capacity() {
        let mut buffer = InputBuffer::new();
        for i in 0..200 {
            buffer.push_discrete(InputEvent::Text(char::from(b'a' + (i % 26) as u8)));
        }
        let capacity = buffer.discrete.capacity();

        buffer.drain();

        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.discrete.capacity(), capacity);
    }
}
