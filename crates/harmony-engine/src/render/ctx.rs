use image::RgbImage;

use crate::config::{FalloffKind, RenderConfig};
use crate::coords::PixelGrid;
use crate::field::{normalize_state, post, Falloff, HarmonyField};
use crate::geometry::TriangleGeometry;
use crate::state::{CalibrationPoint, SourceState};

/// Immutable render inputs (config + calibration + geometry).
///
/// Everything here is borrowed, so a context is cheap to build per call and
/// can be shared across threads when the referents are.
#[derive(Debug, Copy, Clone)]
pub struct RenderCtx<'a> {
    pub config: &'a RenderConfig,
    pub calibration: &'a CalibrationPoint,
    pub geometry: &'a TriangleGeometry,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        config: &'a RenderConfig,
        calibration: &'a CalibrationPoint,
        geometry: &'a TriangleGeometry,
    ) -> Self {
        Self { config, calibration, geometry }
    }

    /// Accumulates the linear field for `state`.
    pub fn field(&self, state: &SourceState, falloff: FalloffKind) -> HarmonyField {
        let weights = normalize_state(state, self.calibration);
        HarmonyField::accumulate(
            PixelGrid::new(self.config.resolution),
            self.geometry,
            weights,
            &Falloff::from_config(self.config, falloff),
            self.config.edge_attenuation,
        )
    }

    /// Full pipeline: field, quantization, then the fail-soft blur.
    pub fn raster(&self, state: &SourceState, falloff: FalloffKind) -> RgbImage {
        let started = std::time::Instant::now();

        let field = self.field(state, falloff);
        let sharp = post::quantize(&field);
        let image = post::soft_blur(sharp, self.config.edge_blur_radius);

        log::debug!(
            "rendered {n}x{n} {falloff} field in {:?} ({} interior px)",
            started.elapsed(),
            field.interior_count(),
            n = self.config.resolution,
        );
        image
    }
}
