//=========================================================================
// Choice Selection Screen
//=========================================================================
//
// One screen type for every one-shot creation choice (origin,
// background): a button per option and an info panel for the option
// under the cursor.
//
// Flow:
//   hover / Up,Down → info panel
//   click / Enter   → record choice + bonuses → successor
//   Escape          → main menu
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::widgets::{
    hovered_index, wrap, Backdrop, Button, Layout, BODY_SIZE, MUTED, NORMAL, TITLE_SIZE,
};
use crate::core::character::CreationChoice;
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Canvas, Color};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const BUTTON_X: f32 = 100.0;
const BUTTON_Y: f32 = 200.0;
const BUTTON_SPACING: f32 = 70.0;
const BUTTON_W: f32 = 300.0;
const BUTTON_H: f32 = 50.0;

const PANEL_X: f32 = 500.0;
const SUMMARY_Y: f32 = 150.0;
const LORE_Y: f32 = 200.0;
const BONUS_Y: f32 = 350.0;

const LORE_SIZE: f32 = 18.0;
const LORE_WRAP: usize = 70;
const LORE_COLOR: Color = Color::rgb(180, 180, 180);
const BONUS_SIZE: f32 = 20.0;
const BONUS_COLOR: Color = Color::rgb(0, 255, 100);
const LINE_SPACING: f32 = 1.3;

const GLITCH_LINES: usize = 8;

//=== ChoiceSelectScene ===================================================

/// Selection screen over every value of `C`.
pub(crate) struct ChoiceSelectScene<C: CreationChoice> {
    backdrop: Backdrop,
    choices: &'static [C],
    buttons: Vec<Button>,
    hovered: Option<usize>,
    selected: usize,
    next: SceneId,
    completion: Completion,
}

impl<C: CreationChoice> ChoiceSelectScene<C> {
    /// Screen that advances to `next` once a choice is made.
    pub(crate) fn new(ctx: &mut GameContext, next: SceneId) -> Self {
        let buttons = C::ALL
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let y = BUTTON_Y + BUTTON_SPACING * i as f32;
                Button::new(BUTTON_X, y, BUTTON_W, BUTTON_H, choice.name())
            })
            .collect();

        Self {
            backdrop: Backdrop::load(ctx, None),
            choices: C::ALL,
            buttons,
            hovered: None,
            selected: 0,
            next,
            completion: Completion::default(),
        }
    }

    /// The option the info panel describes.
    fn focused(&self) -> C {
        self.choices[self.hovered.unwrap_or(self.selected)]
    }

    fn choose(&mut self, index: usize, ctx: &mut GameContext) {
        let choice = self.choices[index];
        choice.apply(&mut ctx.character);
        info!(target: "character", "{}: {}", C::TITLE, choice.name());
        self.completion.finish(Some(self.next));
    }

    fn draw_panel(&self, canvas: &mut dyn Canvas, layout: Layout) {
        let choice = self.focused();

        let summary = format!("{}: {}", choice.name(), choice.description());
        canvas.draw_text(
            &self
                .backdrop
                .text(summary, layout.font(BODY_SIZE))
                .at(layout.point(PANEL_X, SUMMARY_Y))
                .colored(NORMAL),
        );

        let lore_step = LORE_SIZE * LINE_SPACING;
        for (i, line) in wrap(choice.lore(), LORE_WRAP).into_iter().enumerate() {
            let y = LORE_Y + lore_step * i as f32;
            canvas.draw_text(
                &self
                    .backdrop
                    .text(line, layout.font(LORE_SIZE))
                    .at(layout.point(PANEL_X, y))
                    .colored(LORE_COLOR),
            );
        }

        let bonus_step = BONUS_SIZE * LINE_SPACING;
        let lines = std::iter::once("Bonuses:".to_string()).chain(choice.bonus_lines());
        for (i, line) in lines.enumerate() {
            let y = BONUS_Y + bonus_step * i as f32;
            canvas.draw_text(
                &self
                    .backdrop
                    .text(line, layout.font(BONUS_SIZE))
                    .at(layout.point(PANEL_X, y))
                    .colored(BONUS_COLOR),
            );
        }
    }
}

impl<C: CreationChoice> Scene for ChoiceSelectScene<C> {
    fn update(&mut self, dt: f32, _ctx: &mut GameContext) {
        self.backdrop.glitch.update(dt);
    }

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);

        self.backdrop.draw(canvas);
        self.backdrop.glitch.render_glitch_lines(canvas, GLITCH_LINES);

        canvas.draw_text(
            &self
                .backdrop
                .text(C::TITLE, layout.font(TITLE_SIZE))
                .at(layout.point(50.0, 50.0))
                .colored(NORMAL),
        );

        for (i, button) in self.buttons.iter().enumerate() {
            let hovered = self.hovered.unwrap_or(self.selected) == i;
            button.draw(canvas, &self.backdrop, layout, hovered);
        }
        if let Some(i) = self.hovered {
            let bounds = self.buttons[i].bounds(layout);
            self.backdrop.glitch.render_hover_glitch(canvas, bounds);
        }

        self.draw_panel(canvas, layout);

        canvas.draw_text(
            &self
                .backdrop
                .text("Click or press Enter to choose, Esc to go back", layout.font(16.0))
                .at(layout.point(50.0, 600.0))
                .colored(MUTED),
        );
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        let layout = Layout::of(ctx);
        let count = self.choices.len();

        match event {
            InputEvent::MouseMoved { .. } => {
                self.hovered = hovered_index(&self.buttons, layout, ctx.input_state.mouse_position());
                if let Some(i) = self.hovered {
                    self.selected = i;
                }
            }
            _ if event.is_left_click() => {
                if let Some(i) = hovered_index(&self.buttons, layout, ctx.input_state.mouse_position()) {
                    self.choose(i, ctx);
                }
            }
            _ => match event.pressed_key() {
                Some(KeyCode::ArrowDown) => {
                    self.hovered = None;
                    self.selected = (self.selected + 1) % count;
                }
                Some(KeyCode::ArrowUp) => {
                    self.hovered = None;
                    self.selected = (self.selected + count - 1) % count;
                }
                Some(KeyCode::Enter) => self.choose(self.selected, ctx),
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
    use crate::core::character::{Background, Origin, SkillCategory};
    use crate::core::render::recording::RecordingCanvas;
    use tempfile::TempDir;

    fn hover(scene: &mut ChoiceSelectScene<Origin>, ctx: &mut GameContext, x: f32, y: f32) {
        let event = InputEvent::MouseMoved { x, y };
        ctx.input_state.process_event(&event);
        scene.handle_event(&event, ctx);
    }

    #[test]
    fn one_button_per_option() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let origins = ChoiceSelectScene::<Origin>::new(&mut ctx, SceneId::BackgroundSelect);
        let backgrounds = ChoiceSelectScene::<Background>::new(&mut ctx, SceneId::SkillDistribute);

        assert_eq!(origins.buttons.len(), Origin::ALL.len());
        assert_eq!(backgrounds.buttons.len(), Background::ALL.len());
        assert_eq!(backgrounds.buttons[4].label, "Street Doctor");
        assert_eq!(origins.buttons[1].area.y, 270.0);
    }

    #[test]
    fn click_records_origin_and_advances() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = ChoiceSelectScene::<Origin>::new(&mut ctx, SceneId::BackgroundSelect);

        hover(&mut scene, &mut ctx, 150.0, 290.0);
        assert_eq!(scene.focused(), Origin::Street);

        scene.handle_event(&InputEvent::left_click(), &mut ctx);
        assert_eq!(ctx.character.origin(), Some(Origin::Street));
        assert_eq!(scene.take_next(), Some(SceneId::BackgroundSelect));
    }

    #[test]
    fn enter_applies_keyboard_selection_bonuses() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = ChoiceSelectScene::<Background>::new(&mut ctx, SceneId::SkillDistribute);

        scene.handle_event(&InputEvent::key_down(KeyCode::Enter), &mut ctx);

        let hacker = Background::Hacker;
        assert_eq!(ctx.character.background(), Some(hacker));
        for bonus in hacker.bonuses() {
            let level = ctx.character.subskill_level(bonus.category, bonus.subskill);
            assert_eq!(level, Some(bonus.delta as u32));
        }
        assert_eq!(scene.take_next(), Some(SceneId::SkillDistribute));
    }

    #[test]
    fn escape_returns_without_choosing() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = ChoiceSelectScene::<Origin>::new(&mut ctx, SceneId::BackgroundSelect);

        scene.handle_event(&InputEvent::key_down(KeyCode::Escape), &mut ctx);

        assert!(scene.is_finished());
        assert_eq!(scene.take_next(), None);
        assert_eq!(ctx.character.origin(), None);
        assert_eq!(ctx.character.power_level(), 0);
    }

    #[test]
    fn panel_follows_keyboard_selection() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scene = ChoiceSelectScene::<Origin>::new(&mut ctx, SceneId::BackgroundSelect);
        let mut canvas = RecordingCanvas::new(1280, 720);

        scene.handle_event(&InputEvent::key_down(KeyCode::ArrowUp), &mut ctx);
        scene.render(&mut canvas, &ctx);

        let academic = Origin::Academic;
        let summary = format!("{}: {}", academic.name(), academic.description());
        assert!(canvas.has_text(&summary));
        assert!(canvas.has_text("Bonuses:"));
        for line in academic.bonus_lines() {
            assert!(canvas.has_text(&line));
        }
        assert!(canvas.has_text(Origin::TITLE));
    }

    #[test]
    fn bonus_lines_name_their_category() {
        let line = Origin::Corporate.bonus_lines().join(" ");
        assert!(SkillCategory::ALL.iter().any(|c| line.contains(c.name())));
    }
}
