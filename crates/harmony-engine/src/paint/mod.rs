//! Color model shared by the field accumulator and the diagram overlay.
//!
//! Scope:
//! - the three source channels and their basis colors
//! - linear RGB accumulation values
//! - premultiplied RGBA colors for overlay compositing

pub mod channel;
pub mod color;

pub use channel::Channel;
pub use color::{Color, LinearRgb};
