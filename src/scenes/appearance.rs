//=========================================================================
// Appearance Editor
//=========================================================================
//
// Last step of the quick-start path: cycle the six appearance fields,
// preview the layered portrait, then confirm to save the character.
//
// Portrait:
//   base → face → eyes → hair, each resolved through a list of
//   candidate folders and falling back to a placeholder texture.
//   Layers are re-resolved only when the appearance changes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::widgets::{Backdrop, Button, Layout, BODY_SIZE, TITLE_SIZE};
use crate::core::assets::AssetCache;
use crate::core::character::{Appearance, AppearanceField};
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Canvas, Color, Rect, Texture};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const BACKGROUND: &str = "assets/textures/menu.png";
const TITLE: &str = "CUSTOMIZE APPEARANCE";

/// Folders searched for portrait parts, in order.
const PART_ROOTS: [&str; 4] = [
    "assets/character_parts",
    "assets/characters",
    "assets/sprites/character",
    "character_parts",
];

const ROW_X: f32 = 100.0;
const ROW_Y: f32 = 150.0;
const ROW_SPACING: f32 = 50.0;
const VALUE_OFFSET: f32 = 250.0;
const PREV_OFFSET: f32 = 400.0;
const NEXT_OFFSET: f32 = 440.0;
const ARROW_SIZE: f32 = 30.0;

const PORTRAIT_X: f32 = 600.0;
const PORTRAIT_Y: f32 = 200.0;
const PORTRAIT_SCALE: f32 = 2.0;

//=== Portrait ============================================================

/// Candidate file paths for one portrait part.
fn part_paths(folder: &str, part: &str) -> Vec<String> {
    PART_ROOTS
        .iter()
        .map(|root| format!("{}/{}/{}.png", root, folder, part))
        .collect()
}

/// Resolved layer textures for one appearance.
struct Portrait {
    appearance: Appearance,
    layers: Vec<Rc<Texture>>,
}

impl Portrait {
    fn resolve(appearance: Appearance, assets: &mut AssetCache) -> Self {
        let layers = appearance
            .layers()
            .iter()
            .map(|(folder, part)| {
                assets
                    .texture_with_fallback(&part_paths(folder, part))
                    .unwrap_or_else(|| assets.fallback_texture())
            })
            .collect();
        debug!(target: "assets", "Portrait layers resolved for {:?}", appearance.layers());
        Self { appearance, layers }
    }
}

//=== AppearanceScene =====================================================

pub(crate) struct AppearanceScene {
    backdrop: Backdrop,
    /// `(prev, next)` per field.
    arrows: Vec<(Button, Button)>,
    randomize: Button,
    confirm: Button,
    selected: usize,
    hovered: Option<Rect>,
    portrait: Portrait,
    completion: Completion,
}

impl AppearanceScene {
    pub(crate) fn new(ctx: &mut GameContext) -> Self {
        let mut backdrop = Backdrop::load(ctx, Some(BACKGROUND));
        backdrop.glitch.set_background_darkening(true, 0.2);

        let arrows = (0..AppearanceField::ALL.len())
            .map(|i| {
                let y = ROW_Y + ROW_SPACING * i as f32;
                (
                    Button::new(ROW_X + PREV_OFFSET, y, ARROW_SIZE, ARROW_SIZE, "<"),
                    Button::new(ROW_X + NEXT_OFFSET, y, ARROW_SIZE, ARROW_SIZE, ">"),
                )
            })
            .collect();

        let portrait = Portrait::resolve(*ctx.character.appearance(), &mut ctx.assets);

        Self {
            backdrop,
            arrows,
            randomize: Button::new(100.0, 500.0, 120.0, 40.0, "RANDOMIZE"),
            confirm: Button::new(250.0, 500.0, 120.0, 40.0, "CONFIRM"),
            selected: 0,
            hovered: None,
            portrait,
            completion: Completion::default(),
        }
    }

    fn refresh_portrait(&mut self, ctx: &mut GameContext) {
        let current = *ctx.character.appearance();
        if current != self.portrait.appearance {
            self.portrait = Portrait::resolve(current, &mut ctx.assets);
        }
    }

    fn roll_appearance(&mut self, ctx: &mut GameContext) {
        ctx.character.appearance_mut().randomize(self.backdrop.glitch.rng());
        debug!(target: "character", "Appearance randomized");
    }

    fn finish_creation(&mut self, ctx: &mut GameContext) {
        match ctx.complete_creation() {
            Ok(slot) => {
                info!(target: "saves", "Character saved as {}", slot);
                self.completion.finish(Some(SceneId::MainMenu));
            }
            Err(e) => error!(target: "saves", "Could not save character: {}", e),
        }
    }

    fn click(&mut self, ctx: &mut GameContext) {
        let layout = Layout::of(ctx);
        let cursor = ctx.input_state.mouse_position();

        if self.randomize.hit(layout, cursor) {
            self.roll_appearance(ctx);
        } else if self.confirm.hit(layout, cursor) {
            self.finish_creation(ctx);
        } else if let Some((i, (prev, _))) = self
            .arrows
            .iter()
            .enumerate()
            .find(|(_, (prev, next))| prev.hit(layout, cursor) || next.hit(layout, cursor))
        {
            let field = AppearanceField::ALL[i];
            if prev.hit(layout, cursor) {
                ctx.character.appearance_mut().prev(field);
            } else {
                ctx.character.appearance_mut().next(field);
            }
            self.selected = i;
        }
    }

    fn hover_target(&self, ctx: &GameContext) -> Option<Rect> {
        let layout = Layout::of(ctx);
        let cursor = ctx.input_state.mouse_position();
        self.arrows
            .iter()
            .flat_map(|(prev, next)| [prev, next])
            .chain([&self.randomize, &self.confirm])
            .map(|button| button.bounds(layout))
            .find(|bounds| bounds.contains(cursor))
    }
}

impl Scene for AppearanceScene {
    fn on_enter(&mut self, ctx: &mut GameContext) {
        self.refresh_portrait(ctx);
    }

    fn update(&mut self, dt: f32, ctx: &mut GameContext) {
        self.backdrop.glitch.update(dt);
        self.refresh_portrait(ctx);
    }

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);
        let appearance = ctx.character.appearance();

        self.backdrop.draw(canvas);
        self.backdrop.glitch.render_glitch_lines(canvas, 10);

        canvas.draw_text(
            &self
                .backdrop
                .text(TITLE, layout.font(TITLE_SIZE))
                .at(layout.point(ROW_X, 50.0))
                .colored(Color::DARK_RED),
        );

        for (i, field) in AppearanceField::ALL.iter().enumerate() {
            let y = ROW_Y + ROW_SPACING * i as f32;
            let color = if i == self.selected { Color::RED } else { Color::WHITE };
            canvas.draw_text(
                &self
                    .backdrop
                    .text(format!("{}:", field.label()), layout.font(BODY_SIZE))
                    .at(layout.point(ROW_X, y))
                    .colored(color),
            );
            canvas.draw_text(
                &self
                    .backdrop
                    .text(appearance.option(*field), layout.font(BODY_SIZE))
                    .at(layout.point(ROW_X + VALUE_OFFSET, y))
                    .colored(Color::WHITE),
            );

            let (prev, next) = &self.arrows[i];
            prev.draw(canvas, &self.backdrop, layout, false);
            next.draw(canvas, &self.backdrop, layout, false);
        }

        self.randomize.draw(canvas, &self.backdrop, layout, false);
        self.confirm.draw(canvas, &self.backdrop, layout, false);
        if let Some(bounds) = self.hovered {
            self.backdrop.glitch.render_hover_glitch(canvas, bounds);
        }

        let origin = layout.point(PORTRAIT_X, PORTRAIT_Y);
        for layer in &self.portrait.layers {
            let (w, h) = layer.size();
            let dest = Rect::new(
                origin.x,
                origin.y,
                layout.font(w as f32 * PORTRAIT_SCALE),
                layout.font(h as f32 * PORTRAIT_SCALE),
            );
            canvas.draw_texture(layer, dest, Color::WHITE);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        let count = AppearanceField::ALL.len();
        match event {
            InputEvent::MouseMoved { .. } => self.hovered = self.hover_target(ctx),
            _ if event.is_left_click() => self.click(ctx),
            _ => match event.pressed_key() {
                Some(KeyCode::ArrowUp) => self.selected = (self.selected + count - 1) % count,
                Some(KeyCode::ArrowDown) => self.selected = (self.selected + 1) % count,
                Some(KeyCode::ArrowLeft) => {
                    ctx.character.appearance_mut().prev(AppearanceField::ALL[self.selected])
                }
                Some(KeyCode::ArrowRight) => {
                    ctx.character.appearance_mut().next(AppearanceField::ALL[self.selected])
                }
                Some(KeyCode::KeyR) => self.roll_appearance(ctx),
                Some(KeyCode::Enter) => self.finish_creation(ctx),
                Some(KeyCode::Escape) => self.completion.finish(None),
                _ => {}
            },
        }
        self.refresh_portrait(ctx);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::recording::RecordingCanvas;
    use tempfile::TempDir;

    fn click_button(scene: &mut AppearanceScene, ctx: &mut GameContext, button: &Button) {
        let bounds = button.bounds(Layout::of(ctx));
        let moved = InputEvent::MouseMoved { x: bounds.x + 1.0, y: bounds.y + 1.0 };
        ctx.input_state.process_event(&moved);
        scene.handle_event(&moved, ctx);
        scene.handle_event(&InputEvent::left_click(), ctx);
    }

    #[test]
    fn part_paths_try_every_root() {
        let paths = part_paths("hair", "short_black");
        assert_eq!(paths.len(), PART_ROOTS.len());
        assert_eq!(paths[0], "assets/character_parts/hair/short_black.png");
        assert_eq!(paths[3], "character_parts/hair/short_black.png");
    }

    #[test]
    fn arrows_cycle_fields() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = AppearanceScene::new(&mut ctx);

        let prev = scene.arrows[1].0.clone();
        click_button(&mut scene, &mut ctx, &prev);
        assert_eq!(ctx.character.appearance().get(AppearanceField::HairType), 2);
        assert_eq!(scene.selected, 1);

        scene.handle_event(&InputEvent::key_down(KeyCode::ArrowRight), &mut ctx);
        assert_eq!(ctx.character.appearance().get(AppearanceField::HairType), 0);
    }

    #[test]
    fn portrait_follows_appearance() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let part = Texture::solid(4, 6, Color::GREEN);
        ctx.assets.insert_texture("assets/character_parts/face/oval.png", part);
        let mut scene = AppearanceScene::new(&mut ctx);
        assert_eq!(scene.portrait.layers.len(), 4);
        assert_eq!(scene.portrait.layers[1].size(), ctx.assets.fallback_texture().size());

        ctx.character.appearance_mut().set(AppearanceField::FaceType, 1);
        scene.update(0.016, &mut ctx);

        assert_eq!(scene.portrait.appearance, *ctx.character.appearance());
        assert_eq!(scene.portrait.layers[1].size(), (4, 6));
    }

    #[test]
    fn r_randomizes_within_options() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = AppearanceScene::new(&mut ctx);

        for _ in 0..10 {
            scene.handle_event(&InputEvent::key_down(KeyCode::KeyR), &mut ctx);
            for field in AppearanceField::ALL {
                assert!(ctx.character.appearance().get(field) < field.options().len());
            }
        }
        assert_eq!(scene.portrait.appearance, *ctx.character.appearance());
    }

    #[test]
    fn confirm_saves_unnamed_character() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = AppearanceScene::new(&mut ctx);

        let confirm = scene.confirm.clone();
        click_button(&mut scene, &mut ctx, &confirm);

        assert_eq!(ctx.saves.list_slots().len(), 1);
        assert!(ctx.session().is_some());
        assert_eq!(scene.take_next(), Some(SceneId::MainMenu));
    }

    #[test]
    fn render_lists_every_field() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = AppearanceScene::new(&mut ctx);
        let mut canvas = RecordingCanvas::new(1280, 720);

        scene.render(&mut canvas, &ctx);

        for field in AppearanceField::ALL {
            assert!(canvas.has_text(&format!("{}:", field.label())));
        }
        assert!(canvas.has_text("Male"));
        assert!(canvas.has_text("CONFIRM"));
        assert_eq!(canvas.textures().len(), 4);
    }
}
