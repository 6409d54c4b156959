use crate::canvas::Rgba8;
use image::Rgba;

/// Simple RGBA color stored as straight (non-premultiplied) floats in 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Construct from 0-255 channel values.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Convert from the canvas' 8-bit pixel format.
    pub fn from_rgba8(c: Rgba8) -> Self {
        let [r, g, b, a] = c.0;
        Self::rgba(r, g, b, a)
    }

    /// Convert back to 8-bit channels, rounding to the nearest value.
    pub fn to_rgba8(&self) -> Rgba8 {
        if self.a <= 0.5 / 255.0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([
            to_channel(self.r),
            to_channel(self.g),
            to_channel(self.b),
            to_channel(self.a),
        ])
    }

    /// Same color with its alpha scaled by a 0-255 coverage value.
    pub fn with_coverage(self, alpha: u8) -> Self {
        Self {
            a: self.a * alpha as f32 / 255.0,
            ..self
        }
    }

    /// Linear interpolation of every channel towards `other`.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

#[inline]
fn to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Standard "source over" compositing for straight-alpha colors.
pub fn alpha_over(src: Color, dst: Color) -> Color {
    let inv = 1.0 - src.a;
    let out_a = src.a + dst.a * inv;
    if out_a <= f32::EPSILON {
        return Color::TRANSPARENT;
    }

    let mix = |s: f32, d: f32| (s * src.a + d * dst.a * inv) / out_a;
    Color {
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
        a: out_a,
    }
}

/// Remove `strength` (0..1) of the destination's coverage.
pub fn blend_erase(strength: f32, dst: Color) -> Color {
    let a = dst.a * (1.0 - strength.clamp(0.0, 1.0));
    if a <= 0.5 / 255.0 {
        return Color::TRANSPARENT;
    }
    Color { a, ..dst }
}

/// Composite `color` at the given 0-255 coverage over an 8-bit destination.
pub fn over_rgba8(color: Rgba8, alpha: u8, dst: Rgba8) -> Rgba8 {
    let src = Color::from_rgba8(color).with_coverage(alpha);
    alpha_over(src, Color::from_rgba8(dst)).to_rgba8()
}

/// Two colors are similar when no channel differs by more than `tolerance`.
///
/// This per-channel (Chebyshev) test is the only similarity metric in the
/// crate; fills and the replacer painter both go through it.
pub fn colors_similar(a: Rgba8, b: Rgba8, tolerance: u8) -> bool {
    a.0.iter()
        .zip(b.0.iter())
        .all(|(x, y)| x.abs_diff(*y) <= tolerance)
}
