use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::RgbaImage;

use crate::coords::Vec2;
use crate::paint::Color;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. Layout uses a y-down coordinate
/// system so glyph positions map straight onto image rows.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Bounding box `(width, height)` of a single line of text, in pixels.
    ///
    /// Unknown fonts and empty strings measure as zero-width, one line high.
    #[must_use]
    pub fn measure_line(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        // Pen position after each glyph, not the bitmap edge, so trailing
        // spaces and side bearings count toward the width.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs.iter().map(|g| g.y + g.height as f32).fold(size, f32::max);
        Vec2::new(w, h)
    }

    /// Composites one line of text onto `canvas` with its top-left at `origin`.
    ///
    /// Glyph coverage scales `color`'s alpha. Glyphs falling outside the
    /// canvas are clipped. Returns `false` if `id` is unknown.
    pub fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        id: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) -> bool {
        let Some(font) = self.get(id) else {
            log::warn!("FontSystem: unknown FontId {id:?}, skipping text");
            return false;
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { x: origin.x, y: origin.y, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let (cw, ch) = canvas.dimensions();
        for g in layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let (metrics, bitmap) = font.rasterize_config(g.key);

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let px = g.x.round() as i64 + gx as i64;
                    let py = g.y.round() as i64 + gy as i64;
                    if px < 0 || py < 0 || px >= cw as i64 || py >= ch as i64 {
                        continue;
                    }
                    let dst = canvas.get_pixel_mut(px as u32, py as u32);
                    let src = color.with_coverage(coverage as f32 / 255.0);
                    dst.0 = src.over_rgba8(dst.0);
                }
            }
        }
        true
    }
}
