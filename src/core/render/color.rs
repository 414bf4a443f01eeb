//=========================================================================
// Color
//=========================================================================
//
// 8-bit RGBA color plus the packing and blending used by the software
// framebuffer (`0x00RRGGBB` pixels).
//
//=========================================================================

/// 8-bit per channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);

    /// The signature dark red used for titles and glitch duplicates.
    pub const DARK_RED: Self = Self::rgb(139, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Component-wise multiply, used to tint texture samples.
    pub fn modulate(self, tint: Color) -> Self {
        fn mul(a: u8, b: u8) -> u8 {
            ((a as u16 * b as u16 + 127) / 255) as u8
        }

        Self {
            r: mul(self.r, tint.r),
            g: mul(self.g, tint.g),
            b: mul(self.b, tint.b),
            a: mul(self.a, tint.a),
        }
    }

    /// Packs into `0x00RRGGBB`, ignoring alpha.
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Alpha-composites this color over a packed destination pixel.
    pub fn blend_over(self, dst: u32) -> u32 {
        match self.a {
            0 => dst,
            255 => self.to_u32(),
            alpha => {
                let a = alpha as u32;
                let inv = 255 - a;
                let channel = |src: u8, shift: u32| {
                    let d = (dst >> shift) & 0xFF;
                    ((src as u32 * a + d * inv + 127) / 255) << shift
                };
                channel(self.r, 16) | channel(self.g, 8) | channel(self.b, 0)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_rgb_channels() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_u32(), 0x0012_3456);
    }

    #[test]
    fn opaque_and_transparent_blending() {
        assert_eq!(Color::RED.blend_over(0x0000_00FF), 0x00FF_0000);
        assert_eq!(Color::RED.with_alpha(0).blend_over(0x0000_00FF), 0x0000_00FF);
    }

    #[test]
    fn half_alpha_mixes_channels() {
        let mixed = Color::rgba(255, 0, 0, 128).blend_over(0x0000_0000);
        let red = (mixed >> 16) & 0xFF;
        assert!((127..=129).contains(&red), "Expected about half red, got {}", red);
    }

    #[test]
    fn modulate_with_white_is_identity() {
        let c = Color::rgba(10, 20, 30, 40);
        assert_eq!(c.modulate(Color::WHITE), c);
        assert_eq!(c.modulate(Color::BLACK.with_alpha(0)), Color::rgba(0, 0, 0, 0));
    }
}
