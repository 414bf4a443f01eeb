//=========================================================================
// Texture
//=========================================================================
//
// Decoded RGBA8 image held in memory. Textures are shared through
// `Rc<Texture>` handles handed out by the asset cache.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

//=== Internal Dependencies ===============================================

use super::Color;
use crate::core::assets::AssetError;

//=== Texture =============================================================

/// An RGBA8 pixel grid, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    //--- Construction -----------------------------------------------------

    /// Builds a texture from raw pixels.
    ///
    /// Returns `None` when the pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    /// A texture filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    /// Decodes an image file (PNG or JPEG) into RGBA8.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(Self { width, height, pixels })
    }

    /// Placeholder shown when no portrait part could be loaded.
    ///
    /// 64×64, 4px white border around a muted red interior.
    pub fn fallback() -> Self {
        const SIZE: u32 = 64;
        const BORDER: u32 = 4;

        let mut pixels = Vec::with_capacity((SIZE * SIZE) as usize);
        for y in 0..SIZE {
            for x in 0..SIZE {
                let edge = x < BORDER || x >= SIZE - BORDER || y < BORDER || y >= SIZE - BORDER;
                pixels.push(if edge { Color::WHITE } else { Color::rgb(200, 100, 100) });
            }
        }

        Self { width: SIZE, height: SIZE, pixels }
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel at `(x, y)`, clamped to the texture edges.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        if self.pixels.is_empty() {
            return Color::BLACK.with_alpha(0);
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixels_rejects_wrong_length() {
        assert!(Texture::from_pixels(2, 2, vec![Color::WHITE; 3]).is_none());
        assert!(Texture::from_pixels(2, 2, vec![Color::WHITE; 4]).is_some());
    }

    #[test]
    fn fallback_has_white_border_and_red_interior() {
        let texture = Texture::fallback();
        assert_eq!(texture.size(), (64, 64));
        assert_eq!(texture.pixel(0, 0), Color::WHITE);
        assert_eq!(texture.pixel(63, 30), Color::WHITE);
        assert_eq!(texture.pixel(3, 3), Color::WHITE);
        assert_eq!(texture.pixel(4, 4), Color::rgb(200, 100, 100));
        assert_eq!(texture.pixel(32, 32), Color::rgb(200, 100, 100));
    }

    #[test]
    fn pixel_lookup_clamps_to_edges() {
        let texture = Texture::from_pixels(2, 1, vec![Color::RED, Color::GREEN]).unwrap();
        assert_eq!(texture.pixel(5, 9), Color::GREEN);
    }

    #[test]
    fn load_reports_missing_file() {
        let result = Texture::load(Path::new("definitely/not/here.png"));
        assert!(result.is_err(), "Missing files must surface as errors");
    }
}
