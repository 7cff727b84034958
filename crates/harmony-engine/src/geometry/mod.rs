//! Fixed triangle geometry of the harmony field.
//!
//! The triangle is equilateral, apex up, inscribed in the `[-1, 1]²` domain
//! with a safety scale so the corners never touch the image border.

mod triangle;

pub use triangle::{TriangleGeometry, EDGE_TOLERANCE, TRIANGLE_SCALE};
