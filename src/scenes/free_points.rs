//=========================================================================
// Free Point Allocation Screen
//=========================================================================
//
// Flat budget screen of the quick-start path: one point per click into
// any of the six categories, refundable until Enter moves on to the
// appearance editor.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::widgets::{centered_in, Backdrop, Button, Layout, BODY_SIZE, TITLE_SIZE};
use crate::core::character::SkillCategory;
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Canvas, Color};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const BACKGROUND: &str = "assets/textures/menu.png";
const TITLE: &str = "DISTRIBUTE SKILL POINTS";

/// Row order on this screen.
const ROWS: [SkillCategory; 6] = [
    SkillCategory::Tech,
    SkillCategory::Intellect,
    SkillCategory::Biomod,
    SkillCategory::Social,
    SkillCategory::Physical,
    SkillCategory::Combat,
];

const ROW_X: f32 = 100.0;
const ROW_Y: f32 = 200.0;
const ROW_SPACING: f32 = 60.0;
const MINUS_OFFSET: f32 = 350.0;
const PLUS_OFFSET: f32 = 390.0;
const STEP_SIZE: f32 = 30.0;

const STEP_FILL: Color = Color::rgba(50, 50, 50, 180);
const STEP_FILL_HOVER: Color = Color::rgba(80, 80, 80, 200);
const STEP_OUTLINE_HOVER: Color = Color::rgb(200, 0, 0);

const LOW_POINTS: u32 = 5;

//=== Step ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Minus,
    Plus,
}

//=== FreePointsScene =====================================================

pub(crate) struct FreePointsScene {
    backdrop: Backdrop,
    /// `(minus, plus)` per row.
    steps: Vec<(Button, Button)>,
    hovered: Option<(usize, Step)>,
    completion: Completion,
}

impl FreePointsScene {
    pub(crate) fn new(ctx: &mut GameContext) -> Self {
        let mut backdrop = Backdrop::load(ctx, Some(BACKGROUND));
        backdrop.glitch.set_background_darkening(true, 0.5);
        backdrop.glitch.set_analog_glitch(true, 1.0);
        backdrop.glitch.set_cyberpunk_squares(true);

        let steps = (0..ROWS.len())
            .map(|i| {
                let y = ROW_Y + ROW_SPACING * i as f32;
                (
                    Button::new(ROW_X + MINUS_OFFSET, y, STEP_SIZE, STEP_SIZE, "-"),
                    Button::new(ROW_X + PLUS_OFFSET, y, STEP_SIZE, STEP_SIZE, "+"),
                )
            })
            .collect();

        Self { backdrop, steps, hovered: None, completion: Completion::default() }
    }

    fn step_at(&self, ctx: &GameContext) -> Option<(usize, Step)> {
        let layout = Layout::of(ctx);
        let cursor = ctx.input_state.mouse_position();
        self.steps.iter().enumerate().find_map(|(i, (minus, plus))| {
            if minus.hit(layout, cursor) {
                Some((i, Step::Minus))
            } else if plus.hit(layout, cursor) {
                Some((i, Step::Plus))
            } else {
                None
            }
        })
    }

    fn apply(&self, row: usize, step: Step, ctx: &mut GameContext) {
        let category = ROWS[row];
        let pool = ctx.character.free_points_mut();
        let result = match step {
            Step::Plus => pool.add(category),
            Step::Minus => pool.remove(category),
        };
        match result {
            Ok(()) => debug!(target: "character", "{}: {} free points", category, pool.points(category)),
            Err(e) => debug!(target: "character", "{:?} on {} ignored: {}", step, category, e),
        }
    }

    fn remaining_color(remaining: u32) -> Color {
        match remaining {
            0 => Color::GREEN,
            r if r < LOW_POINTS => Color::YELLOW,
            _ => Color::DARK_RED,
        }
    }

    fn draw_step(&self, canvas: &mut dyn Canvas, button: &Button, layout: Layout, hovered: bool) {
        let bounds = button.bounds(layout);
        let (fill, outline) = if hovered {
            (STEP_FILL_HOVER, STEP_OUTLINE_HOVER)
        } else {
            (STEP_FILL, Color::DARK_RED)
        };
        canvas.fill_rect(bounds, fill);
        canvas.outline_rect(bounds, 2.0, outline);

        let label = self
            .backdrop
            .text(button.label.as_str(), layout.font(BODY_SIZE))
            .colored(Color::WHITE);
        canvas.draw_text(&centered_in(label, bounds));
    }
}

impl Scene for FreePointsScene {
    fn update(&mut self, dt: f32, _ctx: &mut GameContext) {
        self.backdrop.glitch.update(dt);
    }

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);
        let pool = ctx.character.free_points();

        self.backdrop.draw(canvas);
        self.backdrop.glitch.render_glitch_lines(canvas, 15);
        self.backdrop.glitch.render_cyberpunk_squares(canvas, 8);

        canvas.draw_text(
            &self
                .backdrop
                .text(TITLE, layout.font(TITLE_SIZE))
                .at(layout.point(ROW_X, 50.0))
                .colored(Color::DARK_RED),
        );
        canvas.draw_text(
            &self
                .backdrop
                .text(format!("Points remaining: {}", pool.remaining()), layout.font(BODY_SIZE))
                .at(layout.point(ROW_X, 130.0))
                .colored(Self::remaining_color(pool.remaining())),
        );

        for (i, category) in ROWS.iter().enumerate() {
            let y = ROW_Y + ROW_SPACING * i as f32;
            canvas.draw_text(
                &self
                    .backdrop
                    .text(
                        format!("{}: {}", category.display_name(), pool.points(*category)),
                        layout.font(BODY_SIZE),
                    )
                    .at(layout.point(ROW_X, y))
                    .colored(Color::WHITE),
            );

            let (minus, plus) = &self.steps[i];
            self.draw_step(canvas, minus, layout, self.hovered == Some((i, Step::Minus)));
            self.draw_step(canvas, plus, layout, self.hovered == Some((i, Step::Plus)));
        }

        if pool.is_exhausted() {
            canvas.draw_text(
                &self
                    .backdrop
                    .text("Press Enter to continue", layout.font(20.0))
                    .at(layout.point(ROW_X, ROW_Y + ROW_SPACING * ROWS.len() as f32 + 20.0))
                    .colored(Color::GREEN),
            );
        }
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        match event {
            InputEvent::MouseMoved { .. } => self.hovered = self.step_at(ctx),
            _ if event.is_left_click() => {
                if let Some((row, step)) = self.step_at(ctx) {
                    self.apply(row, step, ctx);
                }
            }
            _ => match event.pressed_key() {
                Some(KeyCode::Enter) => {
                    let remaining = ctx.character.free_points().remaining();
                    if remaining == 0 {
                        info!(target: "character", "Free points distributed");
                        self.completion.finish(Some(SceneId::Appearance));
                    } else {
                        info!(target: "character", "{} free points left to distribute", remaining);
                    }
                }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::character::FREE_POINT_BUDGET;
    use crate::core::render::recording::RecordingCanvas;
    use crate::core::render::Vec2;
    use tempfile::TempDir;

    fn click(scene: &mut FreePointsScene, ctx: &mut GameContext, row: usize, step: Step) {
        let layout = Layout::of(ctx);
        let (minus, plus) = &scene.steps[row];
        let bounds = match step {
            Step::Minus => minus.bounds(layout),
            Step::Plus => plus.bounds(layout),
        };
        let moved = InputEvent::MouseMoved {
            x: bounds.x + bounds.w / 2.0,
            y: bounds.y + bounds.h / 2.0,
        };
        ctx.input_state.process_event(&moved);
        scene.handle_event(&moved, ctx);
        scene.handle_event(&InputEvent::left_click(), ctx);
    }

    #[test]
    fn plus_and_minus_adjust_row_category() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = FreePointsScene::new(&mut ctx);

        click(&mut scene, &mut ctx, 2, Step::Plus);
        click(&mut scene, &mut ctx, 2, Step::Plus);
        click(&mut scene, &mut ctx, 2, Step::Minus);

        let pool = ctx.character.free_points();
        assert_eq!(pool.points(SkillCategory::Biomod), 1);
        assert_eq!(pool.remaining(), FREE_POINT_BUDGET - 1);
        assert_eq!(scene.hovered, Some((2, Step::Minus)));
    }

    #[test]
    fn minus_at_zero_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = FreePointsScene::new(&mut ctx);

        click(&mut scene, &mut ctx, 0, Step::Minus);

        assert_eq!(ctx.character.free_points().remaining(), FREE_POINT_BUDGET);
    }

    #[test]
    fn enter_waits_for_every_point() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = FreePointsScene::new(&mut ctx);

        scene.handle_event(&InputEvent::key_down(KeyCode::Enter), &mut ctx);
        assert!(!scene.is_finished());

        for _ in 0..FREE_POINT_BUDGET + 3 {
            click(&mut scene, &mut ctx, 5, Step::Plus);
        }
        assert_eq!(ctx.character.free_points().points(SkillCategory::Combat), FREE_POINT_BUDGET);

        scene.handle_event(&InputEvent::key_down(KeyCode::Enter), &mut ctx);
        assert_eq!(scene.take_next(), Some(SceneId::Appearance));
    }

    #[test]
    fn remaining_color_tracks_budget() {
        assert_eq!(FreePointsScene::remaining_color(0), Color::GREEN);
        assert_eq!(FreePointsScene::remaining_color(3), Color::YELLOW);
        assert_eq!(FreePointsScene::remaining_color(12), Color::DARK_RED);
    }

    #[test]
    fn rows_follow_screen_order() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = FreePointsScene::new(&mut ctx);
        let mut canvas = RecordingCanvas::new(1280, 720);

        scene.render(&mut canvas, &ctx);

        let rows: Vec<_> = canvas
            .texts()
            .into_iter()
            .filter(|(c, p, _)| c.ends_with(": 0") && p.x == ROW_X)
            .collect();
        assert_eq!(rows.len(), ROWS.len());
        assert_eq!(rows[2].0, "Bio-modifications: 0");
        assert_eq!(rows[4].1, Vec2::new(ROW_X, 440.0));
        assert!(canvas.has_text("Points remaining: 20"));
        assert!(!canvas.has_text("Press Enter to continue"));
    }
}
