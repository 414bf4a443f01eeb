//=========================================================================
// Settings Screen
//=========================================================================
//
// Keyboard-driven editor for the window settings.
//
// Edits go to a draft copy of the active config. "Save & Back" persists
// the draft and flags it for the platform; Escape drops it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use super::widgets::{Backdrop, Layout, BODY_SIZE};
use crate::core::config::GameConfig;
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Canvas, Color};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const ROW_X: f32 = 100.0;
const ROW_Y: f32 = 100.0;
const ROW_SPACING: f32 = 40.0;

/// The two selectable resolutions.
const RESOLUTIONS: [(u32, u32); 2] = [(1280, 720), (1920, 1080)];

//=== Row =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Resolution,
    Fullscreen,
    VSync,
    SaveAndBack,
}

impl Row {
    const ALL: [Row; 4] = [Self::Resolution, Self::Fullscreen, Self::VSync, Self::SaveAndBack];

    fn label(self, config: &GameConfig) -> String {
        let on_off = |flag: bool| if flag { "ON" } else { "OFF" };
        match self {
            Self::Resolution => format!("Resolution: {}x{}", config.width, config.height),
            Self::Fullscreen => format!("Fullscreen: {}", on_off(config.fullscreen)),
            Self::VSync => format!("VSync: {}", on_off(config.vsync)),
            Self::SaveAndBack => "Save & Back".to_string(),
        }
    }
}

//=== SettingsScene =======================================================

pub(crate) struct SettingsScene {
    backdrop: Backdrop,
    draft: GameConfig,
    selected: usize,
    completion: Completion,
}

impl SettingsScene {
    pub(crate) fn new(ctx: &mut GameContext) -> Self {
        Self {
            backdrop: Backdrop::load(ctx, None),
            draft: ctx.config,
            selected: 0,
            completion: Completion::default(),
        }
    }

    fn toggle(&mut self, row: Row) {
        match row {
            Row::Resolution => {
                let current = (self.draft.width, self.draft.height);
                let (width, height) = if current == RESOLUTIONS[0] {
                    RESOLUTIONS[1]
                } else {
                    RESOLUTIONS[0]
                };
                self.draft.width = width;
                self.draft.height = height;
            }
            Row::Fullscreen => self.draft.fullscreen = !self.draft.fullscreen,
            Row::VSync => self.draft.vsync = !self.draft.vsync,
            Row::SaveAndBack => {}
        }
    }

    fn save(&mut self, ctx: &mut GameContext) {
        match ctx.apply_config(self.draft) {
            Ok(()) => {
                info!(target: "config", "Settings saved: {}x{}, fullscreen {}, vsync {}",
                    self.draft.width, self.draft.height, self.draft.fullscreen, self.draft.vsync);
                self.completion.finish(Some(SceneId::MainMenu));
            }
            Err(e) => error!(target: "config", "Could not save settings: {}", e),
        }
    }
}

impl Scene for SettingsScene {
    fn update(&mut self, _dt: f32, _ctx: &mut GameContext) {}

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);
        self.backdrop.draw(canvas);

        for (index, row) in Row::ALL.iter().enumerate() {
            let color = if index == self.selected { Color::RED } else { Color::WHITE };
            let text = self
                .backdrop
                .text(row.label(&self.draft), layout.font(BODY_SIZE))
                .at(layout.point(ROW_X, ROW_Y + ROW_SPACING * index as f32))
                .colored(color);
            canvas.draw_text(&text);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        let count = Row::ALL.len();
        match event.pressed_key() {
            Some(KeyCode::ArrowDown) => self.selected = (self.selected + 1) % count,
            Some(KeyCode::ArrowUp) => self.selected = (self.selected + count - 1) % count,
            Some(KeyCode::ArrowLeft | KeyCode::ArrowRight) => self.toggle(Row::ALL[self.selected]),
            Some(KeyCode::Enter) if Row::ALL[self.selected] == Row::SaveAndBack => self.save(ctx),
            Some(KeyCode::Escape) => {
                info!(target: "config", "Settings discarded");
                self.completion.finish(Some(SceneId::MainMenu));
            }
            _ => {}
        }
    }

    fn is_finished(&self) -> bool {
        self.completion.is_finished()
    }

    fn take_next(&mut self) -> Option<SceneId> {
        self.completion.take_next()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
