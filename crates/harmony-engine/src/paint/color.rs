use core::ops::{Add, AddAssign, Mul, MulAssign};

/// Unbounded linear RGB triple used while accumulating the field.
///
/// Components may exceed 1.0 before normalization.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn max_component(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Clips to `[0, 1]` and quantizes to 8-bit by truncation.
    #[inline]
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl Add for LinearRgb {
    type Output = LinearRgb;
    #[inline]
    fn add(self, rhs: LinearRgb) -> LinearRgb {
        LinearRgb::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for LinearRgb {
    #[inline]
    fn add_assign(&mut self, rhs: LinearRgb) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for LinearRgb {
    type Output = LinearRgb;
    #[inline]
    fn mul(self, rhs: f32) -> LinearRgb {
        LinearRgb::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl MulAssign<f32> for LinearRgb {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

/// Linear premultiplied RGBA color for overlay compositing.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Same color with alpha scaled by `coverage` (e.g. a glyph mask sample).
    #[inline]
    pub fn with_coverage(self, coverage: f32) -> Self {
        let c = coverage.clamp(0.0, 1.0);
        Self { r: self.r * c, g: self.g * c, b: self.b * c, a: self.a * c }
    }

    /// Source-over composite onto a straight-alpha 8-bit pixel.
    pub fn over_rgba8(self, dst: [u8; 4]) -> [u8; 4] {
        let d = dst.map(|v| v as f32 / 255.0);
        let inv = 1.0 - self.a;
        // dst is straight alpha; premultiply before blending.
        let out_a = self.a + d[3] * inv;
        let out = [
            self.r + d[0] * d[3] * inv,
            self.g + d[1] * d[3] * inv,
            self.b + d[2] * d[3] * inv,
        ];
        let unpremul = |v: f32| if out_a > 0.0 { v / out_a } else { 0.0 };
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(unpremul(out[0])), q(unpremul(out[1])), q(unpremul(out[2])), q(out_a)]
    }
}
