//=========================================================================
// Splash Screen
//=========================================================================
//
// Glitching title art with a blinking prompt. Any key or mouse button
// moves on to the main menu.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::widgets::{Backdrop, Layout};
use crate::core::globals::GameContext;
use crate::core::input::InputEvent;
use crate::core::render::{Canvas, Color, Vec2};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const BACKGROUND: &str = "assets/textures/splash_background.jpg";
const PROMPT: &str = "PRESS ANY KEY TO CONTINUE";
const PROMPT_SIZE: f32 = 24.0;

/// Vertical prompt position as a fraction of the window height.
const PROMPT_HEIGHT: f32 = 0.85;

const GLITCH_LINES: usize = 5;

//=== SplashScene =========================================================

pub(crate) struct SplashScene {
    backdrop: Backdrop,
    completion: Completion,
}

impl SplashScene {
    pub(crate) fn new(ctx: &mut GameContext) -> Self {
        let mut backdrop = Backdrop::load(ctx, Some(BACKGROUND));
        backdrop.glitch.set_background_glitch(true, 1.0);
        backdrop.glitch.set_screen_glitch(true);
        Self { backdrop, completion: Completion::default() }
    }
}

impl Scene for SplashScene {
    fn update(&mut self, dt: f32, _ctx: &mut GameContext) {
        self.backdrop.glitch.update(dt);
    }

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);
        let (width, height) = canvas.size();

        self.backdrop.draw(canvas);
        self.backdrop.glitch.render_glitch_lines(canvas, GLITCH_LINES);

        let prompt = self.backdrop.text(PROMPT, layout.font(PROMPT_SIZE)).colored(Color::DARK_RED);
        let extent = prompt.extent();
        let position = Vec2::new(
            (width as f32 - extent.x) / 2.0,
            height as f32 * PROMPT_HEIGHT - extent.y / 2.0,
        );
        canvas.draw_text(&prompt.at(position));
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut GameContext) {
        if event.is_press() {
            self.completion.finish(Some(SceneId::MainMenu));
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
