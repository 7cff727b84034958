//! Harmony engine crate.
//!
//! Deterministic CPU renderer for the triadic harmony field: three weighted
//! sources on the edge midpoints of a fixed triangle, blended additively in
//! linear RGB and calibrated against a user-chosen white point.

pub mod config;
pub mod coords;
pub mod diagram;
pub mod field;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod state;
pub mod text;

pub use config::{ConfigError, FalloffKind, RenderConfig};
pub use field::{adaptive_sigma, imbalance_score, AdaptiveSigma};
pub use render::{HarmonyRenderer, RenderError};
pub use state::{CalibrationPoint, SourceState};

// Re-exported so callers can pick an output format without a direct dependency.
pub use image::{ImageFormat, RgbImage, RgbaImage};
