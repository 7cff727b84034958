use crate::coords::{PixelGrid, Vec2};
use crate::geometry::TriangleGeometry;
use crate::paint::{Channel, LinearRgb};

use super::Falloff;

/// Linear per-pixel field values before normalization.
///
/// Buffers are row-major, row 0 at the top. Pixels outside both the
/// interior mask and the edge ring stay black.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonyField {
    grid: PixelGrid,
    pixels: Vec<LinearRgb>,
    interior: Vec<bool>,
    ring: Vec<bool>,
}

impl HarmonyField {
    /// Evaluates the three weighted sources over an `N × N` grid.
    ///
    /// `weights` are the calibrated channel weights in channel order. Only
    /// interior pixels (triangle test with edge tolerance) accumulate field;
    /// the 4-connected ring just outside them is then scaled by
    /// `edge_attenuation`. Ring pixels never accumulate, so they stay black
    /// and any softening of the silhouette comes from the final blur.
    pub fn accumulate(
        grid: PixelGrid,
        geometry: &TriangleGeometry,
        weights: [f32; 3],
        falloff: &Falloff,
        edge_attenuation: f32,
    ) -> Self {
        let n = grid.size();
        let mut interior = vec![false; grid.len()];
        let mut pixels = vec![LinearRgb::black(); grid.len()];
        for row in 0..n {
            for col in 0..n {
                let p = grid.domain_point(col, row);
                if !geometry.contains(p) {
                    continue;
                }
                let idx = grid.index(col, row);
                interior[idx] = true;
                pixels[idx] = field_at(p, geometry, weights, falloff);
            }
        }

        let ring = dilate_ring(grid, &interior);
        for (px, _) in pixels.iter_mut().zip(&ring).filter(|(_, on)| **on) {
            *px *= edge_attenuation;
        }

        Self { grid, pixels, interior, ring }
    }

    #[inline]
    pub fn grid(&self) -> PixelGrid {
        self.grid
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.grid.size()
    }

    #[inline]
    pub fn pixels(&self) -> &[LinearRgb] {
        &self.pixels
    }

    /// Accumulated value at `(col, row)`.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> LinearRgb {
        self.pixels[self.grid.index(col, row)]
    }

    /// Accumulated value of one channel at `(col, row)`.
    #[inline]
    pub fn channel(&self, channel: Channel, col: u32, row: u32) -> f32 {
        self.get(col, row).to_array()[channel.index()]
    }

    #[inline]
    pub fn is_interior(&self, col: u32, row: u32) -> bool {
        self.interior[self.grid.index(col, row)]
    }

    #[inline]
    pub fn is_edge(&self, col: u32, row: u32) -> bool {
        self.ring[self.grid.index(col, row)]
    }

    /// Number of pixels inside the triangle mask.
    pub fn interior_count(&self) -> usize {
        self.interior.iter().filter(|&&m| m).count()
    }
}

/// Sum of `basis * falloff * weight` over the three sources at `p`.
#[inline]
fn field_at(p: Vec2, geometry: &TriangleGeometry, weights: [f32; 3], falloff: &Falloff) -> LinearRgb {
    let mut acc = LinearRgb::black();
    for ch in Channel::ALL {
        let d2 = p.distance_sq(geometry.source(ch));
        acc += ch.basis() * (falloff.eval(d2) * weights[ch.index()]);
    }
    acc
}

/// Pixels outside `mask` with a 4-connected neighbour inside it.
fn dilate_ring(grid: PixelGrid, mask: &[bool]) -> Vec<bool> {
    let n = grid.size();
    let mut ring = vec![false; mask.len()];

    for row in 0..n {
        for col in 0..n {
            let idx = grid.index(col, row);
            if mask[idx] {
                continue;
            }
            let inside = |c: u32, r: u32| mask[grid.index(c, r)];
            ring[idx] = (col > 0 && inside(col - 1, row))
                || (col + 1 < n && inside(col + 1, row))
                || (row > 0 && inside(col, row - 1))
                || (row + 1 < n && inside(col, row + 1));
        }
    }

    ring
}
