//! Labeled presentation of a rendered field.
//!
//! Purely derivative: the raster comes from the field pipeline and callout
//! positions from the fixed triangle geometry.

mod callout;
mod compose;

pub use callout::{layout_callouts, Callout, CalloutTarget, SourceNames};
pub use compose::{LabeledDiagram, LABEL_FONT_SIZE};
