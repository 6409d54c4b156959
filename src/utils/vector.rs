use std::ops::{Add, Mul, Sub};

/// 2D point in canvas pixel space; `(0.5, 0.5)` is the center of pixel `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn pixel_center(x: i32, y: i32) -> Self {
        Self::new(x as f32 + 0.5, y as f32 + 0.5)
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Point `t` of the way from `self` to `to`.
    pub fn lerp(self, to: Vec2, t: f32) -> Self {
        self + (to - self) * t
    }

    /// Nearest integer pixel coordinate.
    pub fn round(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<(i32, i32)> for Vec2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f32, y as f32)
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
    fn mul(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_ends() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(5.0, -2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).round(), (3, 0));
    }

    #[test]
    fn pixel_center_is_offset_by_half() {
        assert_eq!(Vec2::pixel_center(2, 3), Vec2::new(2.5, 3.5));
        assert_eq!((Vec2::new(3.0, 4.0) - Vec2::default()).length(), 5.0);
    }
}
