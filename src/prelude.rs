//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use neurocipher::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Game session
pub use crate::core::globals::{GameContext, LoadedGame};

// Character model
pub use crate::core::character::{
    Appearance, AppearanceField, Background, CharacterRecord, CreationChoice, Origin, SkillCategory,
};

// Persistence
pub use crate::core::config::{ConfigStore, GameConfig};
pub use crate::core::saves::{PlayerData, SaveStore};

// Input system
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

// Scene system
pub use crate::core::scene::{Scene, SceneId, SceneManager};

// Rendering
pub use crate::core::render::{Canvas, Color, Rect, Vec2};
