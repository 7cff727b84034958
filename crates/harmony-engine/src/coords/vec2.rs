use core::ops::{Add, Div, Mul, Sub};

/// 2D vector, in domain units or pixels depending on the caller.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean length. Falloff functions work on this directly.
    #[inline]
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn distance_sq(self, other: Vec2) -> f32 {
        (self - other).length_sq()
    }

    #[inline]
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        (self + other) / 2.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_sq_is_symmetric() {
        let a = Vec2::new(0.5, -0.25);
        let b = Vec2::new(-1.0, 1.0);
        assert_eq!(a.distance_sq(b), b.distance_sq(a));
        assert!((a.distance_sq(b) - (2.25 + 1.5625)).abs() < 1e-6);
    }

    #[test]
    fn midpoint_halves_the_segment() {
        let m = Vec2::new(-1.0, 2.0).midpoint(Vec2::new(3.0, 0.0));
        assert_eq!(m, Vec2::new(1.0, 1.0));
    }
}
