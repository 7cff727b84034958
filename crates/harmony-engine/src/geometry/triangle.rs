use crate::coords::Vec2;
use crate::paint::Channel;

/// Scale applied to the inscribed triangle to keep its corners off the border.
pub const TRIANGLE_SCALE: f32 = 0.95;

/// Half-plane slack used by the render mask so edge pixels are not lost to
/// anti-aliasing gaps.
pub const EDGE_TOLERANCE: f32 = 0.005;

/// Vertices, source points and centroid of the field triangle.
///
/// Vertex order is `[top, bottom_left, bottom_right]`. Source points are the
/// edge midpoints in channel order: red on the left edge, green on the right
/// edge, blue on the base.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleGeometry {
    pub vertices: [Vec2; 3],
    pub midpoints: [Vec2; 3],
    pub centroid: Vec2,
}

impl TriangleGeometry {
    /// Equilateral triangle with side `2 * scale`, apex up.
    pub fn with_scale(scale: f32) -> Self {
        let half_h = 3f32.sqrt() / 2.0 * scale;
        let top = Vec2::new(0.0, half_h);
        let bottom_left = Vec2::new(-scale, -half_h);
        let bottom_right = Vec2::new(scale, -half_h);

        Self {
            vertices: [top, bottom_left, bottom_right],
            midpoints: [
                top.midpoint(bottom_left),
                top.midpoint(bottom_right),
                bottom_left.midpoint(bottom_right),
            ],
            centroid: (top + bottom_left + bottom_right) / 3.0,
        }
    }

    #[inline]
    pub fn top(&self) -> Vec2 {
        self.vertices[0]
    }

    #[inline]
    pub fn bottom_left(&self) -> Vec2 {
        self.vertices[1]
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        self.vertices[2]
    }

    /// Source location of `channel`.
    #[inline]
    pub fn source(&self, channel: Channel) -> Vec2 {
        self.midpoints[channel.index()]
    }

    /// The two sources whose edges meet at vertex `i`.
    pub fn vertex_sources(i: usize) -> (Channel, Channel) {
        match i {
            0 => (Channel::Red, Channel::Green),
            1 => (Channel::Red, Channel::Blue),
            _ => (Channel::Green, Channel::Blue),
        }
    }

    /// Render-mask membership, with [`EDGE_TOLERANCE`] slack.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.contains_with_tolerance(p, EDGE_TOLERANCE)
    }

    /// Half-plane test over the three edges.
    ///
    /// A point is rejected only when the cross products disagree in sign by
    /// more than `tolerance`, so points on an edge are always inside.
    pub fn contains_with_tolerance(&self, p: Vec2, tolerance: f32) -> bool {
        let [v1, v2, v3] = self.vertices;
        let d1 = edge_sign(p, v1, v2);
        let d2 = edge_sign(p, v2, v3);
        let d3 = edge_sign(p, v3, v1);

        let has_neg = d1 < -tolerance || d2 < -tolerance || d3 < -tolerance;
        let has_pos = d1 > tolerance || d2 > tolerance || d3 > tolerance;
        !(has_neg && has_pos)
    }
}

impl Default for TriangleGeometry {
    fn default() -> Self {
        Self::with_scale(TRIANGLE_SCALE)
    }
}

#[inline]
fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn vertices_are_scaled_equilateral() {
        let t = TriangleGeometry::default();
        let h = 3f32.sqrt() / 2.0 * 0.95;
        assert!(approx(t.top(), Vec2::new(0.0, h)));
        assert!(approx(t.bottom_left(), Vec2::new(-0.95, -h)));
        assert!(approx(t.bottom_right(), Vec2::new(0.95, -h)));

        let side = |a: Vec2, b: Vec2| a.distance_sq(b).sqrt();
        let s0 = side(t.vertices[0], t.vertices[1]);
        let s1 = side(t.vertices[1], t.vertices[2]);
        let s2 = side(t.vertices[2], t.vertices[0]);
        assert!((s0 - 1.9).abs() < 1e-5 && (s1 - 1.9).abs() < 1e-5 && (s2 - 1.9).abs() < 1e-5);
    }

    #[test]
    fn midpoints_follow_channel_edges() {
        let t = TriangleGeometry::default();
        let h = 3f32.sqrt() / 2.0 * 0.95;
        assert!(approx(t.source(Channel::Red), Vec2::new(-0.475, 0.0)));
        assert!(approx(t.source(Channel::Green), Vec2::new(0.475, 0.0)));
        assert!(approx(t.source(Channel::Blue), Vec2::new(0.0, -h)));
    }

    #[test]
    fn centroid_is_equidistant_from_sources() {
        let t = TriangleGeometry::default();
        let d: Vec<f32> = Channel::ALL
            .iter()
            .map(|&c| t.centroid.distance_sq(t.source(c)))
            .collect();
        assert!((d[0] - d[1]).abs() < 1e-5);
        assert!((d[1] - d[2]).abs() < 1e-5);
    }

    // ── containment ───────────────────────────────────────────────────────

    #[test]
    fn centroid_is_inside() {
        let t = TriangleGeometry::default();
        assert!(t.contains_with_tolerance(t.centroid, 0.0));
    }

    #[test]
    fn vertices_and_midpoints_are_inside_with_zero_tolerance() {
        let t = TriangleGeometry::default();
        for p in t.vertices.iter().chain(t.midpoints.iter()) {
            assert!(t.contains_with_tolerance(*p, 0.0), "{p:?} should be on the boundary");
        }
    }

    #[test]
    fn corners_of_domain_are_outside() {
        let t = TriangleGeometry::default();
        for p in [Vec2::new(-1.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, -0.99)] {
            assert!(!t.contains(p), "{p:?} should be outside");
        }
    }

    #[test]
    fn tolerance_admits_points_just_past_an_edge() {
        let t = TriangleGeometry::default();
        let just_below_base = Vec2::new(0.0, t.bottom_left().y - 0.001);
        assert!(!t.contains_with_tolerance(just_below_base, 0.0));
        assert!(t.contains(just_below_base));
    }
}
