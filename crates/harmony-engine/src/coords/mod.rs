//! Coordinate types shared by the field renderer and the diagram overlay.
//!
//! Two spaces are in play:
//! - Domain space: `[-1, 1]²`, origin at the centre, +X right, +Y up.
//! - Pixel space: origin top-left, +X right, +Y down, `N × N` pixels.
//!
//! [`PixelGrid`] converts between them.

mod grid;
mod vec2;

pub use grid::PixelGrid;
pub use vec2::Vec2;
