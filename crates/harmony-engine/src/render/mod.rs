//! CPU rendering of the harmony field.
//!
//! [`RenderCtx`] bundles the borrowed, immutable inputs shared by every
//! render call; the pipeline functions are pure over it. [`HarmonyRenderer`]
//! owns those inputs for callers that want a single long-lived instance.
//!
//! Convention:
//! - Output rasters are `resolution × resolution`, row 0 at the top.

mod ctx;
mod error;
mod renderer;

pub use ctx::RenderCtx;
pub use error::RenderError;
pub use renderer::HarmonyRenderer;
