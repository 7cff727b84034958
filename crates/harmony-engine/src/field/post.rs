//! Normalization, quantization and blur of an accumulated field.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use image::{imageops, Rgb, RgbImage};

use crate::paint::LinearRgb;

use super::HarmonyField;

/// Floor for the per-pixel maximum; keeps the divisor away from zero.
const MAX_FLOOR: f32 = 1e-10;
/// Pixels whose clamped maximum is at or below this are not rescaled.
const RESCALE_THRESHOLD: f32 = 0.1;

/// Rescales one accumulated pixel toward the unit cube.
///
/// `norm = min(max(r, g, b, 1e-10), 1)`; pixels with `norm > 0.1` are
/// divided by it. Near-black pixels are left alone so noise is not
/// amplified. The result is not clipped.
#[inline]
pub fn normalize_pixel(px: LinearRgb) -> LinearRgb {
    let norm = px.max_component().max(MAX_FLOOR).min(1.0);
    if norm > RESCALE_THRESHOLD {
        px * (1.0 / norm)
    } else {
        px
    }
}

/// Normalizes, clips and quantizes the field into an 8-bit RGB raster.
pub fn quantize(field: &HarmonyField) -> RgbImage {
    let n = field.size();
    let pixels = field.pixels();
    RgbImage::from_fn(n, n, |col, row| {
        let px = pixels[field.grid().index(col, row)];
        Rgb(normalize_pixel(px).to_rgb8())
    })
}

/// Reason the blur step could not run.
#[derive(Debug, Clone, PartialEq)]
pub enum BlurError {
    /// Radius is negative or not finite.
    InvalidRadius(f32),
    /// The filter itself failed.
    Filter(String),
}

impl fmt::Display for BlurError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlurError::InvalidRadius(r) => write!(f, "invalid blur radius {r}"),
            BlurError::Filter(msg) => write!(f, "blur filter failed: {msg}"),
        }
    }
}

impl std::error::Error for BlurError {}

/// Gaussian blur with standard deviation `radius` pixels.
///
/// A radius of zero returns the image unchanged.
pub fn blur(image: &RgbImage, radius: f32) -> Result<RgbImage, BlurError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(BlurError::InvalidRadius(radius));
    }
    if radius == 0.0 || image.width() == 0 || image.height() == 0 {
        return Ok(image.clone());
    }

    panic::catch_unwind(AssertUnwindSafe(|| imageops::blur(image, radius))).map_err(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        BlurError::Filter(msg)
    })
}

/// [`blur`] that never fails: on error the sharp image is returned and a
/// warning is logged.
pub fn soft_blur(image: RgbImage, radius: f32) -> RgbImage {
    match blur(&image, radius) {
        Ok(blurred) => blurred,
        Err(e) => {
            log::warn!("skipping edge blur: {e}");
            image
        }
    }
}
