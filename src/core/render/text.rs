//=========================================================================
// Fonts & Text
//=========================================================================
//
// `Font` wraps a fontdue face loaded from disk. `Text` is a positioned,
// styled string; screens build them each frame and hand them to a
// `Canvas` (directly or through the glitch renderer).
//
// Without a loaded font, text still has estimated bounds so layout and
// hit-testing keep working; it simply draws nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use fontdue::{FontSettings, Metrics};

//=== Internal Dependencies ===============================================

use super::{Color, Rect, Vec2};
use crate::core::assets::AssetError;

//=== Font ================================================================

/// A rasterizable font face.
pub struct Font {
    face: fontdue::Font,
}

impl Font {
    /// Loads a TTF/OTF file.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path)?;
        let face = fontdue::Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| AssetError::Font(e.to_string()))?;
        Ok(Self { face })
    }

    /// Rasterizes one glyph to an 8-bit coverage bitmap.
    pub fn rasterize(&self, ch: char, px: f32) -> (Metrics, Vec<u8>) {
        self.face.rasterize(ch, px)
    }

    /// Distance from the top of a line to its baseline.
    pub fn ascent(&self, px: f32) -> f32 {
        self.face
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px * 0.8)
    }

    /// Width and line height of `content` at `px`.
    pub fn measure(&self, content: &str, px: f32) -> Vec2 {
        let width = content
            .chars()
            .map(|ch| self.face.metrics(ch, px).advance_width)
            .sum();
        let height = self
            .face
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px);
        Vec2::new(width, height)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("glyphs", &self.face.glyph_count())
            .finish()
    }
}

//=== Text ================================================================

/// Average glyph advance relative to the pixel size, used without a font.
const ESTIMATED_ADVANCE: f32 = 0.55;

/// A positioned string with size, fill color and an optional font.
#[derive(Debug, Clone)]
pub struct Text {
    pub content: String,
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
    pub font: Option<Rc<Font>>,
}

impl Text {
    /// White text at the origin.
    pub fn new(content: impl Into<String>, size: f32) -> Self {
        Self {
            content: content.into(),
            position: Vec2::ZERO,
            size,
            color: Color::WHITE,
            font: None,
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_font(mut self, font: Option<Rc<Font>>) -> Self {
        self.font = font;
        self
    }

    /// Same string and style at a different position.
    pub fn moved_to(&self, position: Vec2) -> Self {
        Self { position, ..self.clone() }
    }

    /// Width and height of the rendered string.
    pub fn extent(&self) -> Vec2 {
        match &self.font {
            Some(font) => font.measure(&self.content, self.size),
            None => Vec2::new(
                self.content.chars().count() as f32 * self.size * ESTIMATED_ADVANCE,
                self.size,
            ),
        }
    }

    /// Screen-space bounds.
    pub fn bounds(&self) -> Rect {
        let extent = self.extent();
        Rect::new(self.position.x, self.position.y, extent.x, extent.y)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
