use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::config::{ConfigError, FalloffKind, RenderConfig};
use crate::diagram::{LabeledDiagram, SourceNames};
use crate::field::{adaptive_sigma, AdaptiveSigma, HarmonyField};
use crate::geometry::TriangleGeometry;
use crate::state::{CalibrationPoint, SourceState};
use crate::text::{FontId, FontLoadError, FontSystem};

use super::{RenderCtx, RenderError};

/// Long-lived renderer instance.
///
/// Owns the validated config, the calibrated white point, the memoized
/// triangle geometry and the optional label font. Settings change only
/// through `&mut self`; renders borrow `&self` and are deterministic.
pub struct HarmonyRenderer {
    config: RenderConfig,
    calibration: CalibrationPoint,
    geometry: TriangleGeometry,
    names: SourceNames,
    fonts: FontSystem,
    label_font: Option<FontId>,
}

impl HarmonyRenderer {
    /// Renderer with default settings and neutral calibration.
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
            calibration: CalibrationPoint::neutral(),
            geometry: TriangleGeometry::default(),
            names: SourceNames::default(),
            fonts: FontSystem::new(),
            label_font: None,
        }
    }

    /// Renderer with an explicit configuration.
    pub fn with_config(config: RenderConfig) -> Result<Self, ConfigError> {
        let mut renderer = Self::new();
        renderer.set_config(config)?;
        Ok(renderer)
    }

    // ── settings ──────────────────────────────────────────────────────────

    /// Replaces the render settings. Nothing changes on error.
    pub fn configure(
        &mut self,
        resolution: u32,
        falloff: FalloffKind,
        sigma: f32,
        intensity: f32,
        edge_blur_radius: f32,
        edge_attenuation: f32,
    ) -> Result<(), ConfigError> {
        let config =
            RenderConfig::new(resolution, falloff, sigma, intensity, edge_blur_radius, edge_attenuation)?;
        self.set_config(config)
    }

    pub fn set_config(&mut self, config: RenderConfig) -> Result<(), ConfigError> {
        config.validate()?;
        log::debug!("renderer configured: {config:?}");
        self.config = config;
        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Sets the white point, or resets it to neutral with `None`.
    ///
    /// Channels are clamped to `[0.01, 1]`.
    pub fn set_calibration(&mut self, point: Option<CalibrationPoint>) {
        self.calibration = point.map(|p| p.clamped()).unwrap_or_default();
        log::debug!("calibration set to {:?}", self.calibration);
    }

    #[inline]
    pub fn calibration(&self) -> &CalibrationPoint {
        &self.calibration
    }

    #[inline]
    pub fn geometry(&self) -> &TriangleGeometry {
        &self.geometry
    }

    pub fn set_source_names(&mut self, names: SourceNames) {
        self.names = names;
    }

    #[inline]
    pub fn source_names(&self) -> &SourceNames {
        &self.names
    }

    /// Loads the font used by [`render_labeled`](Self::render_labeled).
    pub fn set_label_font(&mut self, bytes: &[u8]) -> Result<(), FontLoadError> {
        let id = self.fonts.load_font(bytes)?;
        self.label_font = Some(id);
        Ok(())
    }

    #[inline]
    pub fn ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(&self.config, &self.calibration, &self.geometry)
    }

    // ── rendering ─────────────────────────────────────────────────────────

    /// Renders `state` to an `N × N` RGB raster.
    pub fn render(&self, state: &SourceState, falloff: FalloffKind) -> RgbImage {
        self.ctx().raster(state, falloff)
    }

    /// Linear field before normalization, for inspection.
    pub fn render_field(&self, state: &SourceState, falloff: FalloffKind) -> HarmonyField {
        self.ctx().field(state, falloff)
    }

    /// Renders and encodes in `format`.
    pub fn render_bytes(
        &self,
        state: &SourceState,
        falloff: FalloffKind,
        format: ImageFormat,
    ) -> Result<Vec<u8>, RenderError> {
        let image = self.render(state, falloff);
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut buf), format)?;
        Ok(buf)
    }

    /// Renders and writes to `path`; the format follows the extension.
    pub fn save_image(
        &self,
        path: impl AsRef<Path>,
        state: &SourceState,
        falloff: FalloffKind,
    ) -> Result<RgbImage, RenderError> {
        let image = self.render(state, falloff);
        image.save(path.as_ref())?;
        log::info!("saved {}", path.as_ref().display());
        Ok(image)
    }

    /// Renders and annotates vertices, sources and centroid.
    pub fn render_labeled(&self, state: &SourceState, falloff: FalloffKind) -> LabeledDiagram {
        let raster = self.render(state, falloff);
        let font = self.label_font.map(|id| (&self.fonts, id));
        LabeledDiagram::compose(&raster, &self.geometry, &self.names, font)
    }

    /// Renders with the sigma widened for `state`'s imbalance.
    ///
    /// The instance config is not modified; the returned [`AdaptiveSigma`]
    /// tells the caller whether compensation kicked in.
    pub fn render_adaptive(
        &self,
        state: &SourceState,
        falloff: FalloffKind,
    ) -> (RgbImage, AdaptiveSigma) {
        let adaptive = adaptive_sigma(self.config.sigma, state);
        if adaptive.compensating {
            log::info!(
                "adaptive sigma active: {:.2} -> {:.2} (imbalance {:.1}%)",
                self.config.sigma,
                adaptive.sigma,
                adaptive.imbalance * 100.0
            );
        }

        // Adaptive sigma never drops below the validated base.
        let config = RenderConfig { sigma: adaptive.sigma, ..self.config };
        let image = RenderCtx::new(&config, &self.calibration, &self.geometry).raster(state, falloff);
        (image, adaptive)
    }

    /// Small preview at `size` pixels with adaptive sigma and the default falloff.
    pub fn render_thumbnail(&self, state: &SourceState, size: u32) -> Result<RgbImage, ConfigError> {
        let base = self.config.with_resolution(size)?;
        let adaptive = adaptive_sigma(base.sigma, state);
        let config = base.with_sigma(adaptive.sigma)?;
        Ok(RenderCtx::new(&config, &self.calibration, &self.geometry).raster(state, config.falloff))
    }
}

impl Default for HarmonyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::CalloutTarget;
    use crate::geometry::EDGE_TOLERANCE;
    use crate::paint::Channel;

    fn renderer(resolution: u32) -> HarmonyRenderer {
        let mut r = HarmonyRenderer::new();
        r.configure(resolution, FalloffKind::Gaussian, 0.30, 1.2, 0.5, 0.5).unwrap();
        r
    }

    fn pixel_of(r: &HarmonyRenderer, p: crate::coords::Vec2) -> (u32, u32) {
        let (x, y) = crate::coords::PixelGrid::new(r.config().resolution).to_pixel(p);
        (x as u32, y as u32)
    }

    // ── configure ─────────────────────────────────────────────────────────

    #[test]
    fn configure_rejects_zero_resolution_and_keeps_old_config() {
        let mut r = renderer(64);
        let err = r.configure(0, FalloffKind::Gaussian, 0.3, 1.2, 0.5, 0.5).unwrap_err();
        assert_eq!(err, ConfigError::ZeroResolution);
        assert_eq!(r.config().resolution, 64);
    }

    #[test]
    fn configure_rejects_non_positive_sigma() {
        let mut r = renderer(64);
        assert!(r.configure(64, FalloffKind::Gaussian, 0.0, 1.2, 0.5, 0.5).is_err());
        assert!(r.configure(64, FalloffKind::Gaussian, 0.3, 0.0, 0.5, 0.5).is_err());
    }

    // ── calibration ───────────────────────────────────────────────────────

    #[test]
    fn set_calibration_clamps() {
        let mut r = HarmonyRenderer::new();
        r.set_calibration(Some(CalibrationPoint { r: 0.0, g: -5.0, b: 5.0 }));
        assert_eq!(*r.calibration(), CalibrationPoint { r: 0.01, g: 0.01, b: 1.0 });
    }

    #[test]
    fn clearing_calibration_restores_neutral() {
        let mut r = HarmonyRenderer::new();
        r.set_calibration(Some(CalibrationPoint::new(0.3, 0.4, 0.5)));
        r.set_calibration(None);
        assert_eq!(*r.calibration(), CalibrationPoint::neutral());
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn output_is_exactly_n_by_n() {
        for n in [1, 2, 7, 64, 99] {
            let img = renderer(n).render(&SourceState::balanced(), FalloffKind::Gaussian);
            assert_eq!(img.dimensions(), (n, n));
        }
    }

    #[test]
    fn outside_render_mask_is_unlit_without_blur() {
        for attenuation in [0.0, 0.5, 1.0] {
            let mut r = HarmonyRenderer::new();
            r.configure(100, FalloffKind::Gaussian, 0.3, 1.2, 0.0, attenuation).unwrap();
            let img = r.render(&SourceState::balanced(), FalloffKind::Gaussian);
            let grid = crate::coords::PixelGrid::new(100);
            for (x, y, px) in img.enumerate_pixels() {
                let p = grid.domain_point(x, y);
                if !r.geometry().contains_with_tolerance(p, EDGE_TOLERANCE) {
                    assert_eq!(px.0, [0, 0, 0], "lit pixel at ({x}, {y}), attenuation {attenuation}");
                }
            }
        }
    }

    #[test]
    fn tolerance_band_lights_a_few_pixels_past_the_exact_edge() {
        let mut r = HarmonyRenderer::new();
        r.configure(100, FalloffKind::Gaussian, 0.3, 1.2, 0.0, 0.0).unwrap();
        let img = r.render(&SourceState::balanced(), FalloffKind::Gaussian);
        let grid = crate::coords::PixelGrid::new(100);
        let lit_outside = img
            .enumerate_pixels()
            .filter(|(x, y, px)| {
                !r.geometry().contains_with_tolerance(grid.domain_point(*x, *y), 0.0) && px.0 != [0, 0, 0]
            })
            .count();
        assert!(lit_outside > 0);
    }

    #[test]
    fn calibrated_state_is_neutral_at_centroid() {
        let mut r = renderer(101);
        r.set_calibration(Some(CalibrationPoint::new(0.7, 0.7, 0.7)));
        let img = r.render(&SourceState::new(0.7, 0.7, 0.7), FalloffKind::Gaussian);
        let (x, y) = pixel_of(&r, r.geometry().centroid);
        let [cr, cg, cb] = img.get_pixel(x, y).0.map(i32::from);
        assert!((cr - cg).abs() <= 12 && (cg - cb).abs() <= 12 && (cr - cb).abs() <= 12,
            "centroid not neutral: {cr} {cg} {cb}");
    }

    #[test]
    fn skewed_calibration_neutralizes_matching_state() {
        let mut r = renderer(101);
        let cal = CalibrationPoint::new(0.9, 0.45, 0.3);
        r.set_calibration(Some(cal));
        let img = r.render(&SourceState::new(0.9, 0.45, 0.3), FalloffKind::Gaussian);
        let (x, y) = pixel_of(&r, r.geometry().centroid);
        let [cr, cg, cb] = img.get_pixel(x, y).0.map(i32::from);
        assert!((cr - cg).abs() <= 12 && (cg - cb).abs() <= 12, "{cr} {cg} {cb}");
    }

    #[test]
    fn raising_a_weight_raises_its_channel_at_its_source() {
        let r = renderer(81);
        for falloff in [FalloffKind::Gaussian, FalloffKind::InverseSquare] {
            for ch in Channel::ALL {
                let (x, y) = pixel_of(&r, r.geometry().source(ch));
                let mut lo = [0.4f32; 3];
                lo[ch.index()] = 0.2;
                let mut hi = lo;
                hi[ch.index()] = 0.8;
                let a = r.render_field(&SourceState::new(lo[0], lo[1], lo[2]), falloff);
                let b = r.render_field(&SourceState::new(hi[0], hi[1], hi[2]), falloff);
                assert!(b.channel(ch, x, y) > a.channel(ch, x, y), "{falloff} {ch}");
            }
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut r = renderer(60);
        r.set_calibration(Some(CalibrationPoint::new(0.8, 0.6, 0.9)));
        let s = SourceState::new(0.3, 0.9, 0.5);
        assert_eq!(r.render(&s, FalloffKind::Gaussian), r.render(&s, FalloffKind::Gaussian));
    }

    #[test]
    fn falloff_kind_changes_output() {
        let r = renderer(60);
        let s = SourceState::new(0.6, 0.3, 0.9);
        assert_ne!(r.render(&s, FalloffKind::Gaussian), r.render(&s, FalloffKind::InverseSquare));
    }

    #[test]
    fn reference_scenario_centre_and_midpoints() {
        let r = renderer(100);
        let img = r.render(&SourceState::balanced(), FalloffKind::Gaussian);
        let g = r.geometry();

        let (cx, cy) = pixel_of(&r, g.centroid);
        let c = img.get_pixel(cx, cy).0;
        assert!(c.iter().all(|&v| v > 200), "centre not bright: {c:?}");
        let spread = c.iter().max().unwrap() - c.iter().min().unwrap();
        assert!(spread < 20, "centre not neutral: {c:?}");

        for ch in Channel::ALL {
            // A little inside the edge so the sample sits in the interior.
            let src = g.source(ch);
            let (x, y) = pixel_of(&r, src + (g.centroid - src) * 0.1);
            let px = img.get_pixel(x, y).0.map(i32::from);
            let own = px[ch.index()];
            for (i, v) in px.iter().enumerate() {
                if i != ch.index() {
                    assert!(own > v + 30, "{ch} midpoint not dominated: {px:?}");
                }
            }
        }
    }

    // ── variants ──────────────────────────────────────────────────────────

    #[test]
    fn render_bytes_produces_png() {
        let bytes = renderer(32)
            .render_bytes(&SourceState::balanced(), FalloffKind::Gaussian, ImageFormat::Png)
            .unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn save_image_writes_file() {
        let path = std::env::temp_dir().join(format!("harmony-save-{}.png", std::process::id()));
        let img = renderer(24).save_image(&path, &SourceState::balanced(), FalloffKind::Gaussian).unwrap();
        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back, img);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn render_labeled_annotates_raster() {
        let r = renderer(200);
        let d = r.render_labeled(&SourceState::balanced(), FalloffKind::Gaussian);
        assert_eq!(d.canvas.dimensions(), (200, 200));
        assert_eq!(d.callouts.len(), 7);
        assert!(d.callout(CalloutTarget::Source(Channel::Green)).is_some());
        assert!(!d.text_rendered);
    }

    #[test]
    fn render_labeled_with_font_draws_text() {
        let Some(bytes) = crate::text::system_font_bytes() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let bare = renderer(200);
        let mut r = renderer(200);
        r.set_label_font(&bytes).unwrap();

        let state = SourceState::balanced();
        let with_text = r.render_labeled(&state, FalloffKind::Gaussian);
        let boxes_only = bare.render_labeled(&state, FalloffKind::Gaussian);
        assert!(with_text.text_rendered);
        assert_ne!(with_text.canvas, boxes_only.canvas);
    }

    #[test]
    fn label_font_rejects_garbage() {
        let mut r = HarmonyRenderer::new();
        assert!(r.set_label_font(b"nope").is_err());
    }

    #[test]
    fn adaptive_render_reports_compensation() {
        let r = renderer(40);
        let (img, a) = r.render_adaptive(&SourceState::new(1.0, 0.0, 0.0), FalloffKind::Gaussian);
        assert_eq!(img.dimensions(), (40, 40));
        assert!(a.compensating);
        assert!((a.sigma - 0.48).abs() < 1e-4);
        assert_eq!(r.config().sigma, 0.30);
    }

    #[test]
    fn thumbnail_uses_requested_size() {
        let r = renderer(300);
        let state = SourceState::new(0.2, 0.9, 0.4);
        let img = r.render_thumbnail(&state, 48).unwrap();
        assert_eq!(img.dimensions(), (48, 48));

        let small = renderer(48);
        let (adaptive, a) = small.render_adaptive(&state, FalloffKind::Gaussian);
        assert!(a.compensating);
        assert_eq!(img, adaptive);
        assert_ne!(img, small.render(&state, FalloffKind::Gaussian));
        assert!(r.render_thumbnail(&SourceState::balanced(), 0).is_err());
    }
}
