//=========================================================================
// Geometry
//=========================================================================
//
// Minimal 2D vector and rectangle types in window pixel space.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Add, Mul, Neg, Sub};

//=== Vec2 ================================================================

/// A point or offset in window pixels (top-left origin, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle (position is the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering a whole surface of the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Half-open containment test: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.w
            && point.y < self.y + self.h
    }

    /// Returns the rectangle moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic() {
        let a = Vec2::new(2.0, -4.0);
        assert_eq!(a * 0.5, Vec2::new(1.0, -2.0));
        assert_eq!(a + Vec2::new(1.0, 1.0), Vec2::new(3.0, -3.0));
        assert_eq!(a - a, Vec2::ZERO);
        assert_eq!(-a, Vec2::new(-2.0, 4.0));
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(29.9, 14.9)));
        assert!(!rect.contains(Vec2::new(30.0, 12.0)));
        assert!(!rect.contains(Vec2::new(15.0, 15.0)));
    }

    #[test]
    fn rect_translation_keeps_size() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0).translated(Vec2::new(-1.0, 1.0));
        assert_eq!(rect, Rect::new(0.0, 3.0, 3.0, 4.0));
    }
}
