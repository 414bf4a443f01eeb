//=========================================================================
// Glitch Renderer
//=========================================================================
//
// Procedural visual noise layered over whatever screen is drawing.
//
// Architecture:
//   GlitchRenderer<R: Rng>
//     ├─ background: JitterEffect   (0.8s roll, offset ≤ intensity·8)
//     ├─ text:       JitterEffect   (1.0s roll, offset ≤ intensity·5)
//     ├─ analog:     AnalogGhost    (0.05s roll, decaying chroma ghosts)
//     ├─ squares:    SquareBurst    (short visible window per cycle)
//     └─ rng:        R              (owned, injected by the caller)
//
// Flow:
//   update(dt)           → advance every timer, re-roll on threshold
//   render_background()  → base (+ ghosts | jitter) (+ darkening)
//   render_glitch_text() → ghosts | dark-red duplicate + jittered main
//   render_glitch_lines(), render_hover_glitch(), render_cyberpunk_squares()
//
// Analog ghosting takes precedence over legacy jitter wherever both are
// enabled.
//
//=========================================================================

//=== Module Declarations =================================================

mod effects;

//=== External Dependencies ===============================================

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

//=== Internal Dependencies ===============================================

use crate::core::render::{Canvas, Color, Rect, Text, Texture, Vec2};
use effects::{AnalogGhost, JitterEffect, SquareBurst};

//=== Constants ===========================================================

const BACKGROUND_PERIOD: f32 = 0.8;
const TEXT_PERIOD: f32 = 1.0;
const ANALOG_PERIOD: f32 = 0.05;

/// Maximum background jitter per unit of intensity.
const BACKGROUND_JITTER: f32 = 8.0;

/// Maximum text jitter per unit of intensity.
const TEXT_JITTER: f32 = 5.0;

/// Ghost placement as a multiple of the analog offset.
pub const RED_GHOST_FACTOR: f32 = -0.3;
pub const GREEN_GHOST_FACTOR: f32 = 0.5;

/// Ghost tints, blended over the base image.
pub const RED_GHOST_TINT: Color = Color::rgba(255, 60, 60, 110);
pub const GREEN_GHOST_TINT: Color = Color::rgba(60, 255, 60, 90);

/// Flicker-square palette.
pub const SQUARE_PALETTE: [Color; 6] = [
    Color::rgb(255, 0, 60),
    Color::rgb(0, 255, 255),
    Color::rgb(255, 0, 255),
    Color::rgb(255, 230, 0),
    Color::rgb(0, 255, 120),
    Color::rgb(60, 120, 255),
];

const SQUARE_MIN_SIZE: f32 = 4.0;
const SQUARE_MAX_SIZE: f32 = 24.0;

//=== GlitchRenderer ======================================================

/// Stateful glitch generator owning its random source.
///
/// Each screen owns one; tests inject a seeded RNG to make every draw
/// reproducible.
pub struct GlitchRenderer<R: Rng = ChaCha8Rng> {
    rng: R,
    background: JitterEffect,
    text: JitterEffect,
    analog: AnalogGhost,
    squares: SquareBurst,
    lines_enabled: bool,
    darkening: Option<f32>,
    duplicate: Option<Text>,
}

impl GlitchRenderer<ChaCha8Rng> {
    /// Generator backed by a ChaCha8 stream seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GlitchRenderer<R> {
    //--- Construction -----------------------------------------------------

    /// Background, text and line glitches start enabled; analog ghosting,
    /// darkening and squares start disabled.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            background: JitterEffect::new(BACKGROUND_PERIOD),
            text: JitterEffect::new(TEXT_PERIOD),
            analog: AnalogGhost::new(ANALOG_PERIOD),
            squares: SquareBurst::new(),
            lines_enabled: true,
            darkening: None,
            duplicate: None,
        }
    }

    //--- Configuration ----------------------------------------------------

    pub fn set_background_glitch(&mut self, enabled: bool, intensity: f32) {
        self.background.configure(enabled, intensity);
    }

    pub fn set_text_glitch(&mut self, enabled: bool, intensity: f32) {
        self.text.configure(enabled, intensity);
        if !enabled {
            self.duplicate = None;
        }
    }

    /// Toggles the horizontal tear lines.
    pub fn set_screen_glitch(&mut self, enabled: bool) {
        self.lines_enabled = enabled;
    }

    /// Full-screen black overlay drawn after the background.
    pub fn set_background_darkening(&mut self, enabled: bool, intensity: f32) {
        self.darkening = enabled.then_some(intensity.clamp(0.0, 1.0));
    }

    pub fn set_cyberpunk_squares(&mut self, enabled: bool) {
        self.squares.enabled = enabled;
    }

    pub fn set_analog_glitch(&mut self, enabled: bool, intensity: f32) {
        self.analog.configure(enabled, intensity);
    }

    //--- Accessors --------------------------------------------------------

    /// Current chroma ghost offset (zero while analog is disabled).
    pub fn analog_offset(&self) -> Vec2 {
        self.analog.offset
    }

    pub fn is_background_active(&self) -> bool {
        self.background.active
    }

    pub fn is_text_active(&self) -> bool {
        self.text.active
    }

    pub fn squares_visible(&self) -> bool {
        self.squares.visible()
    }

    /// Direct access to the random source for screen-level rolls.
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    //--- Update -----------------------------------------------------------

    /// Advances all effect timers by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.background.update(dt, &mut self.rng);
        self.text.update(dt, &mut self.rng);
        self.analog.update(dt, &mut self.rng);
        self.squares.update(dt, &mut self.rng);
    }

    //--- Rendering --------------------------------------------------------

    /// Draws `texture` stretched over the whole canvas with the active
    /// background effects.
    pub fn render_background(&mut self, canvas: &mut dyn Canvas, texture: &Texture) {
        let (width, height) = canvas.size();
        let dest = Rect::from_size(width, height);

        if self.analog.enabled {
            let offset = self.analog.offset;
            canvas.draw_texture(texture, dest, Color::WHITE);
            canvas.draw_texture(texture, dest.translated(offset * RED_GHOST_FACTOR), RED_GHOST_TINT);
            canvas.draw_texture(texture, dest.translated(offset * GREEN_GHOST_FACTOR), GREEN_GHOST_TINT);
        } else if self.background.active {
            let bound = self.background.intensity * BACKGROUND_JITTER;
            let jitter = Vec2::new(self.random_offset(bound), self.random_offset(bound));
            canvas.draw_texture(texture, dest.translated(jitter), Color::WHITE);
        } else {
            canvas.draw_texture(texture, dest, Color::WHITE);
        }

        if let Some(intensity) = self.darkening {
            let alpha = (intensity * 255.0).round() as u8;
            canvas.fill_rect(dest, Color::BLACK.with_alpha(alpha));
        }
    }

    /// Draws `text` with chroma ghosts or legacy jitter.
    pub fn render_glitch_text(&mut self, canvas: &mut dyn Canvas, text: &Text) {
        if self.analog.enabled {
            let offset = self.analog.offset;
            canvas.draw_text(
                &text.moved_to(text.position + offset * RED_GHOST_FACTOR).colored(RED_GHOST_TINT),
            );
            canvas.draw_text(
                &text.moved_to(text.position + offset * GREEN_GHOST_FACTOR).colored(GREEN_GHOST_TINT),
            );
            canvas.draw_text(text);
            return;
        }

        if !self.text.active {
            canvas.draw_text(text);
            return;
        }

        let bound = self.text.intensity * TEXT_JITTER;
        let jitter = Vec2::new(self.random_offset(bound), self.random_offset(bound));

        let stale = self.duplicate.as_ref().is_none_or(|dup| {
            dup.content != text.content || dup.size != text.size
        });
        if stale {
            self.duplicate = Some(
                Text::new(text.content.clone(), text.size)
                    .colored(Color::DARK_RED)
                    .with_font(text.font.clone()),
            );
        }

        if let Some(duplicate) = &self.duplicate {
            canvas.draw_text(&duplicate.moved_to(text.position - jitter + Vec2::new(2.0, 2.0)));
        }
        canvas.draw_text(&text.moved_to(text.position + jitter));
    }

    /// Draws `count` full-width red tear lines at random heights.
    pub fn render_glitch_lines(&mut self, canvas: &mut dyn Canvas, count: usize) {
        if !self.lines_enabled {
            return;
        }
        let (width, height) = canvas.size();
        if height == 0 {
            return;
        }

        for _ in 0..count {
            let y = self.rng.random_range(0..height) as f32;
            let shade = self.rng.random_range(100..255) as u8;
            canvas.draw_line(Vec2::new(0.0, y), Vec2::new(width as f32, y), Color::rgb(shade, 0, 0));
        }
    }

    /// Draws one thin red bar inside `bounds` (a hovered widget).
    pub fn render_hover_glitch(&mut self, canvas: &mut dyn Canvas, bounds: Rect) {
        let k = self.rng.random_range(0..3) as f32;
        let width = bounds.w * (0.3 + 0.2 * k);

        let x_span = (bounds.w / 2.0).max(0.0) as u32;
        let y_span = (bounds.h - 10.0).max(0.0) as u32;
        let x = bounds.x + self.random_below(x_span);
        let y = bounds.y + 5.0 + self.random_below(y_span);

        canvas.fill_rect(Rect::new(x, y, width, 2.0), Color::RED);
    }

    /// Draws `count` translucent squares while the flicker window is open.
    pub fn render_cyberpunk_squares(&mut self, canvas: &mut dyn Canvas, count: usize) {
        if !self.squares.visible() {
            return;
        }
        let (width, height) = canvas.size();

        for _ in 0..count {
            let size = self.rng.random_range(SQUARE_MIN_SIZE..SQUARE_MAX_SIZE);
            let x = self.rng.random_range(0.0..(width as f32 - size).max(1.0));
            let y = self.rng.random_range(0.0..(height as f32 - size).max(1.0));
            let color = SQUARE_PALETTE[self.rng.random_range(0..SQUARE_PALETTE.len())]
                .with_alpha(self.rng.random_range(90..180));
            canvas.fill_rect(Rect::new(x, y, size, size), color);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Uniform in `[-bound, bound)`; zero for sub-pixel bounds.
    fn random_offset(&mut self, bound: f32) -> f32 {
        if bound < 1.0 {
            return 0.0;
        }
        self.rng.random_range(-bound..bound)
    }

    fn random_below(&mut self, span: u32) -> f32 {
        if span == 0 {
            return 0.0;
        }
        self.rng.random_range(0..span) as f32
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
