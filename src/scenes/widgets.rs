//=========================================================================
// Screen Widgets
//=========================================================================
//
// Building blocks shared by every screen.
//
// Layout:   maps 1280x720 reference coordinates onto the window
// Backdrop: background texture + glitch generator + UI font
// Button:   labelled rectangle with hover styling
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::glitch::GlitchRenderer;
use crate::core::globals::GameContext;
use crate::core::render::{Canvas, Color, Font, Rect, Text, Texture, Vec2};

//=== Palette =============================================================

pub(crate) const NORMAL: Color = Color::DARK_RED;
pub(crate) const HIGHLIGHT: Color = Color::rgb(255, 100, 100);
pub(crate) const MUTED: Color = Color::rgb(150, 150, 150);
pub(crate) const BUTTON_FILL: Color = Color::rgba(20, 20, 20, 180);
pub(crate) const BUTTON_FILL_HOVER: Color = Color::rgba(40, 0, 0, 200);

pub(crate) const TITLE_SIZE: f32 = 48.0;
pub(crate) const BODY_SIZE: f32 = 24.0;
pub(crate) const BUTTON_TEXT_SIZE: f32 = 20.0;

//=== Layout ==============================================================

/// Reference-to-window transform for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Layout {
    sx: f32,
    sy: f32,
}

impl Layout {
    pub(crate) fn of(ctx: &GameContext) -> Self {
        let (sx, sy) = ctx.scale();
        Self { sx, sy }
    }

    pub(crate) fn point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x * self.sx, y * self.sy)
    }

    pub(crate) fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x * self.sx, y * self.sy, w * self.sx, h * self.sy)
    }

    /// Font sizes scale with the smaller axis.
    pub(crate) fn font(&self, px: f32) -> f32 {
        px * self.sx.min(self.sy)
    }
}

//=== Backdrop ============================================================

/// Per-screen visuals: an optional background, its glitch generator and
/// the shared UI font.
pub(crate) struct Backdrop {
    pub(crate) glitch: GlitchRenderer,
    texture: Option<Rc<Texture>>,
    font: Option<Rc<Font>>,
}

impl Backdrop {
    /// Resolves the background and font through the asset cache.
    ///
    /// A missing background only degrades the visuals.
    pub(crate) fn load(ctx: &mut GameContext, background: Option<&str>) -> Self {
        let texture = background.and_then(|path| ctx.assets.texture(path));
        Self {
            glitch: GlitchRenderer::new(ctx.make_rng()),
            texture,
            font: ctx.assets.default_font(),
        }
    }

    /// Text in the UI font.
    pub(crate) fn text(&self, content: impl Into<String>, size: f32) -> Text {
        Text::new(content, size).with_font(self.font.clone())
    }

    /// Clears the frame and draws the background through the glitch
    /// generator.
    pub(crate) fn draw(&mut self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BLACK);
        if let Some(texture) = &self.texture {
            self.glitch.render_background(canvas, texture);
        }
    }
}

//=== Button ==============================================================

/// A rectangular control in reference coordinates.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Button {
    pub(crate) area: Rect,
    pub(crate) label: String,
}

impl Button {
    pub(crate) fn new(x: f32, y: f32, w: f32, h: f32, label: impl Into<String>) -> Self {
        Self { area: Rect::new(x, y, w, h), label: label.into() }
    }

    /// Window-space bounds.
    pub(crate) fn bounds(&self, layout: Layout) -> Rect {
        layout.rect(self.area.x, self.area.y, self.area.w, self.area.h)
    }

    pub(crate) fn hit(&self, layout: Layout, point: Vec2) -> bool {
        self.bounds(layout).contains(point)
    }

    /// Filled box, 2px outline and centred label.
    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, backdrop: &Backdrop, layout: Layout, hovered: bool) {
        let bounds = self.bounds(layout);
        let (fill, accent) = if hovered {
            (BUTTON_FILL_HOVER, HIGHLIGHT)
        } else {
            (BUTTON_FILL, NORMAL)
        };

        canvas.fill_rect(bounds, fill);
        canvas.outline_rect(bounds, 2.0, accent);

        let label = backdrop.text(self.label.as_str(), layout.font(BUTTON_TEXT_SIZE)).colored(accent);
        canvas.draw_text(&centered_in(label, bounds));
    }
}

//=== Helpers =============================================================

/// Moves `text` so it sits centred inside `bounds`.
pub(crate) fn centered_in(text: Text, bounds: Rect) -> Text {
    let extent = text.extent();
    let position = Vec2::new(
        bounds.x + (bounds.w - extent.x) / 2.0,
        bounds.y + (bounds.h - extent.y) / 2.0,
    );
    text.at(position)
}

/// Greedy word wrap at `width` characters.
pub(crate) fn wrap(content: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in content.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Index of the first button under `point`.
pub(crate) fn hovered_index(buttons: &[Button], layout: Layout, point: Vec2) -> Option<usize> {
    buttons.iter().position(|button| button.hit(layout, point))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn layout_scales_from_reference() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        ctx.set_window_size(1920, 1080);
        let layout = Layout::of(&ctx);

        assert_eq!(layout.point(100.0, 200.0), Vec2::new(150.0, 300.0));
        assert_eq!(layout.rect(10.0, 10.0, 20.0, 20.0), Rect::new(15.0, 15.0, 30.0, 30.0));
        assert_eq!(layout.font(24.0), 36.0);
    }

    #[test]
    fn button_hit_uses_scaled_bounds() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        ctx.set_window_size(2560, 1440);
        let layout = Layout::of(&ctx);
        let button = Button::new(100.0, 200.0, 300.0, 50.0, "Street");

        assert!(button.hit(layout, Vec2::new(250.0, 450.0)));
        assert!(!button.hit(layout, Vec2::new(150.0, 250.0)));
    }

    #[test]
    fn hovered_index_finds_first_match() {
        let dir = TempDir::new().unwrap();
        let ctx = GameContext::in_dir(dir.path());
        let layout = Layout::of(&ctx);
        let buttons = [
            Button::new(0.0, 0.0, 10.0, 10.0, "a"),
            Button::new(0.0, 20.0, 10.0, 10.0, "b"),
        ];

        assert_eq!(hovered_index(&buttons, layout, Vec2::new(5.0, 25.0)), Some(1));
        assert_eq!(hovered_index(&buttons, layout, Vec2::new(50.0, 50.0)), None);
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(wrap("grew up in the arcology", 10), ["grew up in", "the", "arcology"]);
        assert_eq!(wrap("   ", 10), Vec::<String>::new());
        assert_eq!(wrap("unbreakableword", 4), ["unbreakableword"]);
    }

    #[test]
    fn centered_text_sits_inside_bounds() {
        let text = centered_in(Text::new("ok", 20.0), Rect::new(0.0, 0.0, 100.0, 40.0));
        let bounds = text.bounds();

        assert!(bounds.x > 0.0 && bounds.x + bounds.w < 100.0);
        assert_eq!(bounds.y, 10.0);
    }
}
