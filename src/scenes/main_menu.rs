//=========================================================================
// Main Menu
//=========================================================================
//
// Entry hub: both character-creation paths, loading, settings and exit.
//
// Items are laid out relative to the window height and activated by
// mouse click or Up/Down + Enter.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::widgets::{Backdrop, Layout};
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Canvas, Color, Rect, Vec2};
use crate::core::scene::{Completion, Scene, SceneId};

//=== Constants ===========================================================

const BACKGROUND: &str = "assets/textures/menu.png";
const TITLE: &str = "NEUROCIPHER REBOOT";
const TITLE_SIZE: f32 = 76.0;
const ITEM_SIZE: f32 = 24.0;

/// Left edge and title baseline as fractions of the window size.
const BASE_X: f32 = 0.078;
const BASE_Y: f32 = 0.139;

/// Item offsets below the title, as fractions of the window height.
const ITEM_OFFSETS: [f32; 5] = [0.278, 0.347, 0.417, 0.486, 0.555];

const TITLE_ROLL_PERIOD: f32 = 1.0;
const TITLE_JITTER: i32 = 2;

//=== MenuItem ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    StartGame,
    OriginPath,
    LoadGame,
    Options,
    Exit,
}

impl MenuItem {
    const ALL: [MenuItem; 5] = [
        Self::StartGame,
        Self::OriginPath,
        Self::LoadGame,
        Self::Options,
        Self::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::StartGame => "Start game",
            Self::OriginPath => "Origin path",
            Self::LoadGame => "Load game",
            Self::Options => "Options",
            Self::Exit => "Exit",
        }
    }
}

//=== TitleGlitch =========================================================

/// The title's own jitter: re-rolled once per second, on a third of the
/// rolls the title shakes and a dark-red copy shows through.
#[derive(Debug, Default)]
struct TitleGlitch {
    timer: f32,
    active: bool,
    offset: Vec2,
}

impl TitleGlitch {
    fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        self.timer += dt;
        if self.timer > TITLE_ROLL_PERIOD {
            self.timer = 0.0;
            self.active = rng.random_ratio(1, 3);
        }
        self.offset = if self.active {
            Vec2::new(
                rng.random_range(-TITLE_JITTER..=TITLE_JITTER) as f32,
                rng.random_range(-TITLE_JITTER..=TITLE_JITTER) as f32,
            )
        } else {
            Vec2::ZERO
        };
    }
}

//=== MainMenuScene =======================================================

pub(crate) struct MainMenuScene {
    backdrop: Backdrop,
    title: TitleGlitch,
    selected: usize,
    hovered: Option<usize>,
    completion: Completion,
}

impl MainMenuScene {
    pub(crate) fn new(ctx: &mut GameContext) -> Self {
        let mut backdrop = Backdrop::load(ctx, Some(BACKGROUND));
        backdrop.glitch.set_background_glitch(true, 0.5);
        Self {
            backdrop,
            title: TitleGlitch::default(),
            selected: 0,
            hovered: None,
            completion: Completion::default(),
        }
    }

    //--- Layout -----------------------------------------------------------

    fn item_origin(index: usize, ctx: &GameContext) -> Vec2 {
        let (width, height) = ctx.window_size();
        let (width, height) = (width as f32, height as f32);
        Vec2::new(width * BASE_X, height * (BASE_Y + ITEM_OFFSETS[index]))
    }

    fn item_bounds(&self, index: usize, ctx: &GameContext) -> Rect {
        let layout = Layout::of(ctx);
        let label = self.backdrop.text(MenuItem::ALL[index].label(), layout.font(ITEM_SIZE));
        label.at(Self::item_origin(index, ctx)).bounds()
    }

    fn item_at(&self, point: Vec2, ctx: &GameContext) -> Option<usize> {
        (0..MenuItem::ALL.len()).find(|&i| self.item_bounds(i, ctx).contains(point))
    }

    //--- Actions ----------------------------------------------------------

    fn activate(&mut self, item: MenuItem, ctx: &mut GameContext) {
        info!(target: "scene", "Main menu: {}", item.label());
        match item {
            MenuItem::StartGame => {
                ctx.begin_creation();
                self.completion.finish(Some(SceneId::Specialization));
            }
            MenuItem::OriginPath => {
                ctx.begin_creation();
                self.completion.finish(Some(SceneId::OriginSelect));
            }
            MenuItem::LoadGame => match ctx.load_most_recent() {
                Ok(Some(game)) => {
                    info!(target: "saves", "Loaded slot {} for {}", game.slot, game.player.name)
                }
                Ok(None) => {}
                Err(e) => error!(target: "saves", "Failed to load save: {}", e),
            },
            MenuItem::Options => self.completion.finish(Some(SceneId::Settings)),
            MenuItem::Exit => ctx.request_exit(),
        }
    }
}

impl Scene for MainMenuScene {
    fn update(&mut self, dt: f32, _ctx: &mut GameContext) {
        self.backdrop.glitch.update(dt);
        self.title.update(dt, self.backdrop.glitch.rng());
    }

    fn render(&mut self, canvas: &mut dyn Canvas, ctx: &GameContext) {
        let layout = Layout::of(ctx);
        let (width, height) = canvas.size();
        let title_origin = Vec2::new(width as f32 * BASE_X, height as f32 * BASE_Y);

        self.backdrop.draw(canvas);

        let title = self.backdrop.text(TITLE, layout.font(TITLE_SIZE));
        if self.title.active {
            let ghost = title.moved_to(title_origin - self.title.offset + Vec2::new(2.0, 2.0));
            canvas.draw_text(&ghost.colored(Color::DARK_RED));
        }
        canvas.draw_text(&title.at(title_origin + self.title.offset));

        for (index, item) in MenuItem::ALL.iter().enumerate() {
            let highlighted = self.hovered.unwrap_or(self.selected) == index;
            let color = if highlighted { Color::RED } else { Color::WHITE };
            let label = self
                .backdrop
                .text(item.label(), layout.font(ITEM_SIZE))
                .at(Self::item_origin(index, ctx))
                .colored(color);
            canvas.draw_text(&label);

            if self.hovered == Some(index) {
                let bounds = label.bounds();
                self.backdrop.glitch.render_hover_glitch(canvas, bounds);
            }
        }
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GameContext) {
        let count = MenuItem::ALL.len();
        match event {
            InputEvent::MouseMoved { x, y } => {
                self.hovered = self.item_at(Vec2::new(*x, *y), ctx);
                if let Some(index) = self.hovered {
                    self.selected = index;
                }
            }
            _ if event.is_left_click() => {
                if let Some(index) = self.item_at(ctx.input_state.mouse_position(), ctx) {
                    self.selected = index;
                    self.activate(MenuItem::ALL[index], ctx);
                }
            }
            _ => match event.pressed_key() {
                Some(KeyCode::ArrowUp) => {
                    self.hovered = None;
                    self.selected = (self.selected + count - 1) % count;
                }
                Some(KeyCode::ArrowDown) => {
                    self.hovered = None;
                    self.selected = (self.selected + 1) % count;
                }
                Some(KeyCode::Enter) => self.activate(MenuItem::ALL[self.selected], ctx),
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
