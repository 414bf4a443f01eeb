//=========================================================================
// Neurocipher Reboot: Library Root
//
// Character-creation front end of a cyberpunk RPG: a splash screen, a
// main menu and two creation paths that end in a saved character.
//
// Responsibilities:
// - Expose the game entry point (`Engine`, `EngineBuilder`)
// - Expose `core` (character model, persistence, rendering seam, glitch
//   renderer) for tools and tests
// - Keep the screens and the OS integration private
//
// Typical usage:
// ```no_run
// use neurocipher::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every platform-independent system: scene flow, character
// record, config and save stores, assets, input and the Canvas seam.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `scenes` implements the individual screens on top of `core`.
// `platform` owns the window, the softbuffer surface and the event loop.
// `engine` wires them together.
//
mod scenes;
mod platform;
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
