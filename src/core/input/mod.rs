//=========================================================================
// Input System
//=========================================================================
//
// Engine-side input types and persistent input state.
//
// Architecture:
//   platform::InputProcessor → InputEvent → StateTracker
//                                        ↘ Scene::handle_event
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;
