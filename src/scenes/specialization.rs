//=========================================================================
// Specialization Screen
//=========================================================================
//
// First step of the quick-start path: a row of portrait cards, one per
// background. Clicking a card records the background (and its bonuses)
// and moves on to free-point allocation.
//
// The heaviest glitch preset in the game: ghosted background, darkening,
// jittered title, flickering squares.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::info;

//=== Internal Dependencies ===============================================

use super::widgets::{hovered_index, Backdrop, Button, Layout, BODY_SIZE};
use crate::core::character::{Background, CreationChoice};
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Canvas, Color, Texture};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const BACKGROUND: &str = "assets/textures/menu.png";
const TITLE: &str = "CHOOSE YOUR SPECIALIZATION";
const TITLE_SIZE: f32 = 72.0;

/// Card art per background, in `Background::ALL` order.
const CARD_TEXTURES: [&str; 6] = [
    "assets/textures/z.png",
    "assets/textures/corpo.png",
    "assets/textures/street.png",
    "assets/textures/tech.png",
    "assets/textures/z.png",
    "assets/textures/corpo.png",
];

const CARD_X: f32 = 50.0;
const CARD_Y: f32 = 180.0;
const CARD_SPACING: f32 = 200.0;
const CARD_W: f32 = 130.0;
const CARD_H: f32 = 195.0;

const GLITCH_LINES: usize = 15;
const SQUARES: usize = 8;

//=== SpecializationScene =================================================

pub(crate) struct SpecializationScene {
    backdrop: Backdrop,
    cards: Vec<Button>,
    art: Vec<Rc<Texture>>,
    hovered: Option<usize>,
    completion: Completion,
}

impl SpecializationScene {
    pub(crate) fn new(ctx: &mut GameContext) -> Self {
        let mut backdrop = Backdrop::load(ctx, Some(BACKGROUND));
        backdrop.glitch.set_text_glitch(true, 1.0);
        backdrop.glitch.set_analog_glitch(true, 1.0);
        backdrop.glitch.set_background_darkening(true, 0.3);
        backdrop.glitch.set_cyberpunk_squares(true);

        let cards = Background::ALL
            .iter()
            .enumerate()
            .map(|(i, background)| {
                let x = CARD_X + CARD_SPACING * i as f32;
                Button::new(x, CARD_Y, CARD_W, CARD_H, background.name())
            })
            .collect();

        let art = CARD_TEXTURES
            .iter()
            .map(|path| ctx.assets.texture(path).unwrap_or_else(|| ctx.assets.fallback_texture()))
            .collect();

        Self { backdrop, cards, art, hovered: None, completion: Completion::default() }
    }

    fn choose(&mut self, index: usize, ctx: &mut GameContext) {
        let background = Background::ALL[index];
        background.apply(&mut ctx.character);
        info!(target: "character", "Specialization: {}", background.name());
        self.completion.finish(Some(SceneId::FreePointsAllocate));
    }
}

impl Scene for SpecializationScene {
    fn update(&mut self, dt: f32, _ctx: &mut GameContext) {
        self.backdrop.glitch.update(dt);
    }

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);

        self.backdrop.draw(canvas);
        self.backdrop.glitch.render_glitch_lines(canvas, GLITCH_LINES);
        self.backdrop.glitch.render_cyberpunk_squares(canvas, SQUARES);

        let title = self
            .backdrop
            .text(TITLE, layout.font(TITLE_SIZE))
            .at(layout.point(10.0, 10.0))
            .colored(Color::DARK_RED);
        self.backdrop.glitch.render_glitch_text(canvas, &title);

        for (i, (card, art)) in self.cards.iter().zip(&self.art).enumerate() {
            let bounds = card.bounds(layout);
            let hovered = self.hovered == Some(i);

            canvas.draw_texture(art, bounds, Color::WHITE);
            canvas.outline_rect(bounds, 1.0, if hovered { Color::YELLOW } else { Color::GREEN });
            if hovered {
                self.backdrop.glitch.render_hover_glitch(canvas, bounds);
            }

            let label = self
                .backdrop
                .text(card.label.as_str(), layout.font(BODY_SIZE))
                .at(layout.point(card.area.x + 10.0, card.area.y + card.area.h + 10.0))
                .colored(Color::DARK_RED);
            self.backdrop.glitch.render_glitch_text(canvas, &label);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        let layout = Layout::of(ctx);
        match event {
            InputEvent::MouseMoved { .. } => {
                self.hovered = hovered_index(&self.cards, layout, ctx.input_state.mouse_position());
            }
            _ if event.is_left_click() => {
                if let Some(i) = hovered_index(&self.cards, layout, ctx.input_state.mouse_position()) {
                    self.choose(i, ctx);
                }
            }
            _ if event.pressed_key() == Some(KeyCode::Escape) => self.completion.finish(None),
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
