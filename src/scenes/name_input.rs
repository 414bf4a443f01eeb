//=========================================================================
// Name Input Screen
//=========================================================================
//
// Last step of the origin path: type a name, press Enter, and the
// character is written to a fresh save slot.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use super::widgets::{Backdrop, Layout, BODY_SIZE, MUTED, NORMAL, TITLE_SIZE};
use crate::core::character::MAX_NAME_LEN;
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Canvas, Color};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const CARET_PERIOD: f32 = 0.5;

const BOX_X: f32 = 400.0;
const BOX_Y: f32 = 300.0;
const BOX_W: f32 = 500.0;
const BOX_H: f32 = 50.0;

const BOX_FILL: Color = Color::rgba(20, 20, 20, 200);

//=== NameInputScene ======================================================

pub(crate) struct NameInputScene {
    backdrop: Backdrop,
    name: String,
    caret_timer: f32,
    caret_visible: bool,
    completion: Completion,
}

impl NameInputScene {
    pub(crate) fn new(ctx: &mut GameContext) -> Self {
        Self {
            backdrop: Backdrop::load(ctx, None),
            name: String::new(),
            caret_timer: 0.0,
            caret_visible: true,
            completion: Completion::default(),
        }
    }

    fn push(&mut self, c: char) {
        if c.is_control() || self.name.chars().count() >= MAX_NAME_LEN {
            return;
        }
        self.name.push(c);
    }

    fn confirm(&mut self, ctx: &mut GameContext) {
        if !ctx.character.set_name(&self.name) {
            info!(target: "character", "Name is empty, not saving");
            return;
        }

        match ctx.complete_creation() {
            Ok(slot) => {
                info!(target: "saves", "Character saved as {}", slot);
                self.completion.finish(Some(SceneId::MainMenu));
            }
            Err(e) => error!(target: "saves", "Could not save character: {}", e),
        }
    }
}

impl Scene for NameInputScene {
    fn update(&mut self, dt: f32, _ctx: &mut GameContext) {
        self.backdrop.glitch.update(dt);
        self.caret_timer += dt;
        if self.caret_timer >= CARET_PERIOD {
            self.caret_timer = 0.0;
            self.caret_visible = !self.caret_visible;
        }
    }

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);
        self.backdrop.draw(canvas);
        self.backdrop.glitch.render_glitch_lines(canvas, 5);

        canvas.draw_text(
            &self
                .backdrop
                .text("Enter Character Name", layout.font(TITLE_SIZE))
                .at(layout.point(50.0, 50.0))
                .colored(NORMAL),
        );
        canvas.draw_text(
            &self
                .backdrop
                .text("Type your character's name and press Enter", layout.font(20.0))
                .at(layout.point(BOX_X, 250.0))
                .colored(MUTED),
        );

        let field = layout.rect(BOX_X, BOX_Y, BOX_W, BOX_H);
        canvas.fill_rect(field, BOX_FILL);
        canvas.outline_rect(field, 2.0, NORMAL);

        let mut shown = self.name.clone();
        if self.caret_visible {
            shown.push('|');
        }
        if !shown.is_empty() {
            canvas.draw_text(
                &self
                    .backdrop
                    .text(shown, layout.font(BODY_SIZE))
                    .at(layout.point(BOX_X + 10.0, BOX_Y + 15.0))
                    .colored(NORMAL),
            );
        }
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        match event {
            InputEvent::Text(c) => self.push(*c),
            _ => match event.pressed_key() {
                Some(KeyCode::Backspace) => {
                    self.name.pop();
                }
                Some(KeyCode::Enter) => self.confirm(ctx),
                Some(KeyCode::Escape) => self.completion.finish(None),
                _ => {}
            },
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
