use super::Vec2;

/// Square sampling grid mapping `N × N` pixels onto the `[-1, 1]²` domain.
///
/// Pixel centres sit on an `N`-point linspace in each axis, so the first and
/// last columns land exactly on `-1` and `+1`. Row 0 is the top of the image
/// (`y = +1`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PixelGrid {
    size: u32,
}

impl PixelGrid {
    #[inline]
    pub const fn new(size: u32) -> Self {
        Self { size }
    }

    #[inline]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Number of pixels in the grid.
    #[inline]
    pub fn len(self) -> usize {
        self.size as usize * self.size as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size == 0
    }

    /// Domain coordinate of the linspace sample `k`.
    ///
    /// A one-point linspace degenerates to its start value.
    #[inline]
    fn sample(self, k: u32) -> f32 {
        if self.size <= 1 {
            return -1.0;
        }
        -1.0 + 2.0 * k as f32 / (self.size - 1) as f32
    }

    /// Domain point for pixel `(col, row)`; the y axis is flipped so row 0 is the top.
    #[inline]
    pub fn domain_point(self, col: u32, row: u32) -> Vec2 {
        let flipped = self.size.saturating_sub(1).saturating_sub(row);
        Vec2::new(self.sample(col), self.sample(flipped))
    }

    /// Maps a domain point to pixel coordinates, truncating toward zero.
    ///
    /// Results may fall outside the grid for points outside the domain.
    #[inline]
    pub fn to_pixel(self, p: Vec2) -> (i32, i32) {
        let span = self.size.saturating_sub(1) as f32;
        let x = (p.x + 1.0) * span / 2.0;
        let y = (1.0 - p.y) * span / 2.0;
        (x as i32, y as i32)
    }

    /// Row-major buffer index of `(col, row)`.
    #[inline]
    pub fn index(self, col: u32, row: u32) -> usize {
        row as usize * self.size as usize + col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── domain_point ──────────────────────────────────────────────────────

    #[test]
    fn corners_hit_domain_bounds() {
        let g = PixelGrid::new(5);
        assert_eq!(g.domain_point(0, 0), Vec2::new(-1.0, 1.0));
        assert_eq!(g.domain_point(4, 4), Vec2::new(1.0, -1.0));
        assert_eq!(g.domain_point(2, 2), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn single_pixel_grid_is_degenerate_linspace() {
        let g = PixelGrid::new(1);
        assert_eq!(g.domain_point(0, 0), Vec2::new(-1.0, -1.0));
    }

    // ── to_pixel ──────────────────────────────────────────────────────────

    #[test]
    fn to_pixel_inverts_domain_point_on_samples() {
        let g = PixelGrid::new(101);
        for &(c, r) in &[(0, 0), (50, 50), (100, 100), (25, 75)] {
            let (x, y) = g.to_pixel(g.domain_point(c, r));
            assert!((x - c as i32).abs() <= 1, "col {c} -> {x}");
            assert!((y - r as i32).abs() <= 1, "row {r} -> {y}");
        }
    }

    #[test]
    fn index_is_row_major() {
        let g = PixelGrid::new(10);
        assert_eq!(g.index(3, 2), 23);
        assert_eq!(g.len(), 100);
    }
}
