//=========================================================================
// Render Seam
//=========================================================================
//
// Drawing primitives the screens and the glitch renderer target.
//
// Architecture:
//   Scene::render / GlitchRenderer
//        ↓ (dyn Canvas)
//   FrameBuffer (software, presented by the platform via softbuffer)
//
// Everything above the Canvas trait is backend-agnostic, so tests can
// substitute a recording canvas and assert on draw calls.
//
//=========================================================================

//=== Module Declarations =================================================

mod color;
mod framebuffer;
mod geometry;
mod text;
mod texture;

#[cfg(test)]
pub(crate) mod recording;

//=== Public API ==========================================================

pub use color::Color;
pub use framebuffer::FrameBuffer;
pub use geometry::{Rect, Vec2};
pub use text::{Font, Text};
pub use texture::Texture;

//=== Canvas Trait ========================================================

/// Target surface for all drawing.
///
/// Coordinates are window pixels with a top-left origin. Colors with
/// alpha below 255 are blended over what is already drawn.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    /// Fills `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// One-pixel-wide line from `from` to `to`.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Draws `texture` stretched to `dest`, multiplied by `tint`.
    fn draw_texture(&mut self, texture: &Texture, dest: Rect, tint: Color);

    /// Draws a string using its own font, size and color.
    fn draw_text(&mut self, text: &Text);

    /// Draws a border of `thickness` just inside `rect`.
    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        let t = thickness.min(rect.w / 2.0).min(rect.h / 2.0);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y + rect.h - t, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y + t, t, rect.h - 2.0 * t), color);
        self.fill_rect(Rect::new(rect.x + rect.w - t, rect.y + t, t, rect.h - 2.0 * t), color);
    }
}
