//! Colour representation for PRC entities

use std::fmt;

/// An RGBA colour with double-precision channels in `[0, 1]`.
///
/// Equality is exact field-wise floating-point equality; two colours that
/// differ only by rounding are distinct palette entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl RgbaColor {
    /// Create a colour from all four channels
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        RgbaColor { r, g, b, a }
    }

    /// Create an opaque colour
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        RgbaColor { r, g, b, a: 1.0 }
    }

    /// Whether every channel is a finite number
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Whether the colour is not fully opaque
    pub fn is_transparent(&self) -> bool {
        self.a < 1.0
    }

    /// Alpha as the byte the style table stores (0 = clear, 255 = opaque)
    pub fn transparency_byte(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub const BLACK: RgbaColor = RgbaColor::rgb(0.0, 0.0, 0.0);
    pub const WHITE: RgbaColor = RgbaColor::rgb(1.0, 1.0, 1.0);
    pub const RED: RgbaColor = RgbaColor::rgb(1.0, 0.0, 0.0);
    pub const GREEN: RgbaColor = RgbaColor::rgb(0.0, 1.0, 0.0);
    pub const BLUE: RgbaColor = RgbaColor::rgb(0.0, 0.0, 1.0);
}

impl Default for RgbaColor {
    fn default() -> Self {
        RgbaColor::BLACK
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
