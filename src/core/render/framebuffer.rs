//=========================================================================
// Frame Buffer
//=========================================================================
//
// Software canvas over a `Vec<u32>` of `0x00RRGGBB` pixels, the format
// softbuffer presents. All primitives clip to the surface.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Canvas, Color, Rect, Text, Texture, Vec2};

//=== FrameBuffer =========================================================

/// CPU-side render target.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    //--- Construction -----------------------------------------------------

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Resizes the surface, discarding its contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width as usize) * (height as usize)];
    }

    //--- Accessors --------------------------------------------------------

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed pixel at `(x, y)`; `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = (y as usize) * (self.width as usize) + x as usize;
        self.pixels[index] = color.blend_over(self.pixels[index]);
    }

    /// Integer pixel span covered by `rect`, clipped to the surface.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.round().max(0.0) as i64;
        let y0 = rect.y.round().max(0.0) as i64;
        let x1 = ((rect.x + rect.w).round() as i64).min(self.width as i64);
        let y1 = ((rect.y + rect.h).round() as i64).min(self.height as i64);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

//=== Canvas Implementation ===============================================

impl Canvas for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };

        for y in y0..y1 {
            let row = (y * self.width) as usize;
            for x in x0..x1 {
                let index = row + x as usize;
                self.pixels[index] = color.blend_over(self.pixels[index]);
            }
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as u32;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = from + delta * t;
            self.blend_pixel(p.x.floor() as i64, p.y.floor() as i64, color);
        }
    }

    fn draw_texture(&mut self, texture: &Texture, dest: Rect, tint: Color) {
        if texture.width() == 0 || texture.height() == 0 || dest.w <= 0.0 || dest.h <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(dest) else {
            return;
        };

        let sx = texture.width() as f32 / dest.w;
        let sy = texture.height() as f32 / dest.h;

        for y in y0..y1 {
            let v = ((y as f32 + 0.5 - dest.y) * sy).max(0.0) as u32;
            for x in x0..x1 {
                let u = ((x as f32 + 0.5 - dest.x) * sx).max(0.0) as u32;
                let sample = texture.pixel(u, v).modulate(tint);
                let index = (y * self.width + x) as usize;
                self.pixels[index] = sample.blend_over(self.pixels[index]);
            }
        }
    }

    fn draw_text(&mut self, text: &Text) {
        let Some(font) = text.font.as_ref() else {
            return;
        };

        let baseline = text.position.y + font.ascent(text.size);
        let mut pen_x = text.position.x;

        for ch in text.content.chars() {
            let (metrics, coverage) = font.rasterize(ch, text.size);
            let left = (pen_x + metrics.xmin as f32).round() as i64;
            let top = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i64;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let c = coverage[row * metrics.width + col];
                    if c == 0 {
                        continue;
                    }
                    let alpha = (text.color.a as u16 * c as u16 / 255) as u8;
                    self.blend_pixel(left + col as i64, top + row as i64, text.color.with_alpha(alpha));
                }
            }

            pen_x += metrics.advance_width;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
