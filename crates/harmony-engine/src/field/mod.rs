//! Harmony field computation.
//!
//! Pipeline per render:
//! 1. [`normalize_state`] applies the white-point calibration to the state.
//! 2. [`HarmonyField::accumulate`] evaluates the three source falloffs over
//!    the pixel grid and attenuates the edge ring.
//! 3. [`post::quantize`] normalizes and converts to an 8-bit raster.
//! 4. [`post::soft_blur`] softens the raster, falling back to the sharp
//!    image if the blur cannot run.
//!
//! [`adaptive_sigma`] is independent of the pipeline; callers use it to pick
//! a wider sigma for lopsided states before configuring a render.

mod accumulate;
mod adaptive;
mod calibration;
mod falloff;
pub mod post;

pub use accumulate::HarmonyField;
pub use adaptive::{adaptive_sigma, imbalance_score, AdaptiveSigma};
pub use calibration::normalize_state;
pub use falloff::Falloff;
