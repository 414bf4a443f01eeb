//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the active scene and swaps it when it finishes.
//
// Scenes are built on demand by a factory and dropped synchronously at
// transition time, so each visit to a screen starts fresh.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneId};
use crate::core::globals::GameContext;
use crate::core::input::InputEvent;
use crate::core::render::Canvas;

//=== SceneFactory ========================================================

/// Builds the scene for an id.
pub type SceneFactory = fn(SceneId, &mut GameContext) -> Box<dyn Scene>;

//=== Scene Manager =======================================================

/// Drives exactly one live scene.
pub struct SceneManager {
    factory: SceneFactory,
    current: Box<dyn Scene>,
    current_id: SceneId,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    /// Builds and enters `initial`.
    pub fn new(factory: SceneFactory, initial: SceneId, ctx: &mut GameContext) -> Self {
        info!(target: "scene", "Starting on {:?}", initial);
        let mut current = factory(initial, ctx);
        current.on_enter(ctx);
        Self { factory, current, current_id: initial }
    }

    pub fn current_id(&self) -> SceneId {
        self.current_id
    }

    //--- Frame ------------------------------------------------------------

    /// Updates the scene and performs its transition if it finished.
    pub fn tick(&mut self, dt: f32, ctx: &mut GameContext) {
        self.current.update(dt, ctx);

        if self.current.is_finished() {
            let requested = self.current.take_next();
            let next = self.resolve(requested);
            self.switch_to(next, ctx);
        }
    }

    /// Records the event in the input state, then forwards it unchanged.
    pub fn dispatch(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        trace!(target: "scene", "Dispatching {:?} to {:?}", event, self.current_id);
        ctx.input_state.process_event(event);
        self.current.handle_event(event, ctx);
    }

    pub fn paint(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        self.current.render(canvas, ctx);
    }

    //--- Internal Helpers -------------------------------------------------

    /// Checks `requested` against the transition table.
    fn resolve(&self, requested: Option<SceneId>) -> SceneId {
        match requested {
            Some(next) if self.current_id.allows(next) => next,
            Some(next) => {
                warn!(target: "scene", "{:?} is not a successor of {:?}; returning to main menu",
                    next, self.current_id);
                SceneId::MainMenu
            }
            None => SceneId::MainMenu,
        }
    }

    fn switch_to(&mut self, next: SceneId, ctx: &mut GameContext) {
        info!(target: "scene", "Transition {:?} -> {:?}", self.current_id, next);

        self.current.on_exit(ctx);
        let mut scene = (self.factory)(next, ctx);
        scene.on_enter(ctx);

        self.current = scene;
        self.current_id = next;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
