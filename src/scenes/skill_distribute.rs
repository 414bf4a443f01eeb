//=========================================================================
// Skill Distribution Screen
//=========================================================================
//
// Spends the cost-curve skill budget over every subskill.
//
// Layout: categories in a two-column grid, one row per subskill with
// "+"/"-" controls, an info panel for the hovered row, and a FINISH
// button once the budget is spent.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::widgets::{wrap, Backdrop, Button, Layout, BODY_SIZE, MUTED, NORMAL, TITLE_SIZE};
use crate::core::character::{CharacterRecord, SkillCategory};
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Canvas, Color, Rect};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const GRID_X: f32 = 50.0;
const GRID_Y: f32 = 140.0;
const COLUMN_WIDTH: f32 = 370.0;
const ROW_HEIGHT: f32 = 170.0;

const HEADER_SIZE: f32 = 22.0;
const SUBSKILL_SIZE: f32 = 16.0;
const SUBSKILL_TOP: f32 = 30.0;
const SUBSKILL_STEP: f32 = 22.0;
const SUBSKILL_WIDTH: f32 = 340.0;
const SUBSKILL_COLOR: Color = Color::rgb(200, 200, 200);

const PLUS_OFFSET: f32 = 280.0;
const MINUS_OFFSET: f32 = 310.0;
const CONTROL_SIZE: f32 = 20.0;

const INFO_X: f32 = 820.0;
const INFO_Y: f32 = 150.0;
const INFO_SIZE: f32 = 18.0;

const FINISH_LABEL: &str = "FINISH";

//=== SubskillControl =====================================================

/// One subskill row and its two buttons.
struct SubskillControl {
    category: SkillCategory,
    subskill: &'static str,
    row: Rect,
    plus: Button,
    minus: Button,
}

impl SubskillControl {
    fn layout_all() -> Vec<Self> {
        let mut controls = Vec::new();
        for (i, category) in SkillCategory::ALL.into_iter().enumerate() {
            let x = GRID_X + COLUMN_WIDTH * (i % 2) as f32;
            let y = GRID_Y + ROW_HEIGHT * (i / 2) as f32;

            for (j, subskill) in category.subskill_names().iter().enumerate() {
                let row_y = y + SUBSKILL_TOP + SUBSKILL_STEP * j as f32;
                controls.push(Self {
                    category,
                    subskill,
                    row: Rect::new(x, row_y, SUBSKILL_WIDTH, SUBSKILL_STEP),
                    plus: Button::new(x + PLUS_OFFSET, row_y, CONTROL_SIZE, CONTROL_SIZE, "+"),
                    minus: Button::new(x + MINUS_OFFSET, row_y, CONTROL_SIZE, CONTROL_SIZE, "-"),
                });
            }
        }
        controls
    }

    fn level(&self, record: &CharacterRecord) -> u32 {
        record.subskill_level(self.category, self.subskill).unwrap_or(0)
    }
}

//=== SkillDistributeScene ================================================

pub(crate) struct SkillDistributeScene {
    backdrop: Backdrop,
    controls: Vec<SubskillControl>,
    finish: Button,
    focused: Option<usize>,
    completion: Completion,
}

impl SkillDistributeScene {
    pub(crate) fn new(ctx: &mut GameContext) -> Self {
        Self {
            backdrop: Backdrop::load(ctx, None),
            controls: SubskillControl::layout_all(),
            finish: Button::new(1000.0, 650.0, 150.0, 40.0, FINISH_LABEL),
            focused: None,
            completion: Completion::default(),
        }
    }

    fn raise(&self, index: usize, ctx: &mut GameContext) {
        let control = &self.controls[index];
        match ctx.character.raise_subskill(control.category, control.subskill) {
            Ok(cost) => debug!(target: "character", "{} raised for {} points", control.subskill, cost),
            Err(e) => info!(target: "character", "Cannot raise {}: {}", control.subskill, e),
        }
    }

    fn lower(&self, index: usize, ctx: &mut GameContext) {
        let control = &self.controls[index];
        match ctx.character.lower_subskill(control.category, control.subskill) {
            Ok(refund) => debug!(target: "character", "{} lowered, {} points back", control.subskill, refund),
            Err(e) => info!(target: "character", "Cannot lower {}: {}", control.subskill, e),
        }
    }

    fn try_finish(&mut self, ctx: &GameContext) {
        if ctx.character.skill_points().is_exhausted() {
            info!(target: "character", "Skill points distributed, power level {}",
                ctx.character.power_level());
            self.completion.finish(Some(SceneId::NameInput));
        }
    }

    fn info_lines(&self, index: usize, record: &CharacterRecord) -> Vec<String> {
        let control = &self.controls[index];
        let level = control.level(record);
        let mut lines = vec![
            format!("{} - {}", control.category.display_name(), control.subskill),
            format!("Current Level: {}", level),
        ];

        let Some(skill) = record.skill(control.category) else {
            return lines;
        };
        let pool = record.skill_points();
        match pool.next_cost(skill, control.subskill) {
            Some(_) if skill.subskill(control.subskill).is_some_and(|s| s.is_maxed()) => {
                lines.push("Maximum level reached".to_string());
            }
            Some(cost) => {
                lines.push(format!("Next Level Cost: {} points", cost));
                lines.push(
                    if pool.can_afford(skill, control.subskill) {
                        "Can afford upgrade"
                    } else {
                        "Cannot afford upgrade"
                    }
                    .to_string(),
                );
            }
            None => {}
        }
        lines
    }
}

impl Scene for SkillDistributeScene {
    fn update(&mut self, dt: f32, _ctx: &mut GameContext) {
        self.backdrop.glitch.update(dt);
    }

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);
        let record = &ctx.character;
        let pool = record.skill_points();

        self.backdrop.draw(canvas);
        self.backdrop.glitch.render_glitch_lines(canvas, 8);

        let header = |text: String, size: f32, x: f32, y: f32, color: Color| {
            self.backdrop.text(text, layout.font(size)).at(layout.point(x, y)).colored(color)
        };

        canvas.draw_text(&header("Distribute Skill Points".into(), TITLE_SIZE, 50.0, 50.0, NORMAL));
        canvas.draw_text(&header(
            format!("Skill Points Remaining: {}", pool.remaining()),
            BODY_SIZE,
            50.0,
            100.0,
            NORMAL,
        ));

        for (i, category) in SkillCategory::ALL.into_iter().enumerate() {
            let x = GRID_X + COLUMN_WIDTH * (i % 2) as f32;
            let y = GRID_Y + ROW_HEIGHT * (i / 2) as f32;
            canvas.draw_text(&header(category.display_name().into(), HEADER_SIZE, x, y, NORMAL));
        }

        for (index, control) in self.controls.iter().enumerate() {
            let level = control.level(record);
            let color = if self.focused == Some(index) { Color::WHITE } else { SUBSKILL_COLOR };
            canvas.draw_text(&header(
                format!("  {}: {}", control.subskill, level),
                SUBSKILL_SIZE,
                control.row.x,
                control.row.y,
                color,
            ));

            let affordable = record
                .skill(control.category)
                .is_some_and(|skill| pool.can_afford(skill, control.subskill));
            control.plus.draw(canvas, &self.backdrop, layout, affordable);
            if pool.purchased_levels(control.category, control.subskill) > 0 {
                control.minus.draw(canvas, &self.backdrop, layout, false);
            }
        }

        if let Some(index) = self.focused {
            for (i, line) in self.info_lines(index, record).into_iter().enumerate() {
                let y = INFO_Y + INFO_SIZE * 1.4 * i as f32;
                canvas.draw_text(&header(line, INFO_SIZE, INFO_X, y, SUBSKILL_COLOR));
            }
        }

        let hint = "Click + to raise a skill, - to take a level back. Higher levels cost more.";
        for (i, line) in wrap(hint, 90).into_iter().enumerate() {
            canvas.draw_text(&header(line, 16.0, 50.0, 660.0 + 20.0 * i as f32, MUTED));
        }

        if pool.is_exhausted() {
            self.finish.draw(canvas, &self.backdrop, layout, true);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        let layout = Layout::of(ctx);
        let cursor = ctx.input_state.mouse_position();

        match event {
            InputEvent::MouseMoved { .. } => {
                self.focused = self
                    .controls
                    .iter()
                    .position(|c| layout.rect(c.row.x, c.row.y, c.row.w, c.row.h).contains(cursor));
            }
            _ if event.is_left_click() => {
                if ctx.character.skill_points().is_exhausted() && self.finish.hit(layout, cursor) {
                    self.try_finish(ctx);
                    return;
                }
                if let Some(i) = self.controls.iter().position(|c| c.plus.hit(layout, cursor)) {
                    self.raise(i, ctx);
                } else if let Some(i) = self.controls.iter().position(|c| c.minus.hit(layout, cursor)) {
                    self.lower(i, ctx);
                }
            }
            _ => match event.pressed_key() {
                Some(KeyCode::Enter) => self.try_finish(ctx),
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
