//=========================================================================
// Core Systems
//=========================================================================
//
// Platform-independent game systems.
//
// Architecture:
//   scene     → SceneManager + transition table
//   globals   → GameContext handed to every scene
//   character → Character Record, allocation pools, bonuses, appearance
//   glitch    → procedural visual noise
//   render    → Canvas seam, software framebuffer, text and textures
//   assets    → shared texture and font cache
//   input     → engine input events and held-state tracking
//   config    → config.cfg window settings
//   saves     → save-slot directories
//
// Everything here runs on the single frame-loop thread; the platform
// layer drives it through SceneManager::{dispatch, tick, paint}.
//
//=========================================================================

pub mod assets;
pub mod character;
pub mod config;
pub mod glitch;
pub mod globals;
pub mod input;
pub mod render;
pub mod saves;
pub mod scene;
