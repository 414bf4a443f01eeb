//=========================================================================
// Scene System
//=========================================================================
//
// One active screen at a time, switched through a declared transition
// table.
//
// Architecture:
//   SceneManager
//     ├─ current: Box<dyn Scene>
//     └─ factory: SceneId → Box<dyn Scene>
//
// Flow:
//   tick() → Scene::update() → finished? → take_next() → successors()
//          → install successor (or MainMenu)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GameContext;
use crate::core::input::InputEvent;
use crate::core::render::Canvas;

//=== Module Declarations =================================================

mod scene_manager;

//=== Public API ==========================================================

pub use scene_manager::{SceneFactory, SceneManager};

//=== SceneId =============================================================

/// Every screen in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Splash,
    MainMenu,
    Settings,
    OriginSelect,
    BackgroundSelect,
    SkillDistribute,
    NameInput,
    Specialization,
    FreePointsAllocate,
    Appearance,
}

impl SceneId {
    pub const ALL: [SceneId; 10] = [
        Self::Splash,
        Self::MainMenu,
        Self::Settings,
        Self::OriginSelect,
        Self::BackgroundSelect,
        Self::SkillDistribute,
        Self::NameInput,
        Self::Specialization,
        Self::FreePointsAllocate,
        Self::Appearance,
    ];

    /// Screens this one may hand over to.
    ///
    /// MainMenu is always the fallback and needs no entry.
    pub fn successors(self) -> &'static [SceneId] {
        match self {
            Self::Splash => &[Self::MainMenu],
            Self::MainMenu => &[Self::Settings, Self::Specialization, Self::OriginSelect],
            Self::Settings => &[Self::MainMenu],
            Self::OriginSelect => &[Self::BackgroundSelect],
            Self::BackgroundSelect => &[Self::SkillDistribute],
            Self::SkillDistribute => &[Self::NameInput],
            Self::NameInput => &[Self::MainMenu],
            Self::Specialization => &[Self::FreePointsAllocate],
            Self::FreePointsAllocate => &[Self::Appearance],
            Self::Appearance => &[Self::MainMenu],
        }
    }

    /// Whether `next` is a declared successor of this screen.
    pub fn allows(self, next: SceneId) -> bool {
        next == Self::MainMenu || self.successors().contains(&next)
    }
}

//=== Scene Trait =========================================================

/// A screen driven by the [`SceneManager`].
///
/// A scene signals completion through `is_finished`; the manager then
/// takes its successor once with `take_next`. `None` means "back to the
/// main menu".
///
/// Lifecycle hooks have default empty implementations.
pub trait Scene {
    /// Called right after the scene is installed.
    fn on_enter(&mut self, _ctx: &mut GameContext) {}

    /// Called right before the scene is dropped.
    fn on_exit(&mut self, _ctx: &mut GameContext) {}

    /// Advances the scene by `dt` seconds.
    fn update(&mut self, dt: f32, ctx: &mut GameContext);

    /// Draws the scene.
    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext);

    /// Reacts to one input event.
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext);

    fn is_finished(&self) -> bool;

    fn take_next(&mut self) -> Option<SceneId>;
}

//=== Completion ==========================================================

/// Finished flag plus successor, shared by every screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    finished: bool,
    next: Option<SceneId>,
}

impl Completion {
    /// Marks the scene finished with `next` as successor.
    pub fn finish(&mut self, next: Option<SceneId>) {
        self.finished = true;
        self.next = next;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn take_next(&mut self) -> Option<SceneId> {
        self.next.take()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
