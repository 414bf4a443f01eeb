//=========================================================================
// Global Game State
//=========================================================================
//
// The context every scene receives.
//
// Architecture:
//   SceneManager (owns the active scene)
//   GameContext: config + saves + assets + character + input state
//                (passed to scenes each frame)
//
//=========================================================================

//=== Module Declarations =================================================

mod game_context;

//=== Public API ==========================================================

pub use game_context::{GameContext, LoadedGame, REFERENCE_HEIGHT, REFERENCE_WIDTH};
