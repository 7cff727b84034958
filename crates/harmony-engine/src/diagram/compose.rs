use image::{Rgba, RgbaImage, RgbImage};

use crate::coords::{PixelGrid, Vec2};
use crate::geometry::TriangleGeometry;
use crate::paint::Color;
use crate::text::{FontId, FontSystem};

use super::callout::{layout_callouts, Callout, CalloutTarget, SourceNames};

/// Label text size in pixels.
pub const LABEL_FONT_SIZE: f32 = 11.0;
/// Box padding as a fraction of the font size.
const BOX_PAD: f32 = 0.3;
const LINE_HEIGHT: f32 = 1.2;
/// Advance estimate used to size boxes when no font is loaded.
const FALLBACK_ADVANCE: f32 = 0.6;

/// Rendered field with callouts composited on top.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDiagram {
    pub canvas: RgbaImage,
    pub callouts: Vec<Callout>,
    /// True when label glyphs were rasterized, false for boxes only.
    pub text_rendered: bool,
}

impl LabeledDiagram {
    /// Places `raster` on an opaque black canvas and annotates it.
    ///
    /// With `font = None` the callout boxes are still drawn so the layout
    /// stays identical; only the glyphs are missing.
    pub fn compose(
        raster: &RgbImage,
        geometry: &TriangleGeometry,
        names: &SourceNames,
        font: Option<(&FontSystem, FontId)>,
    ) -> Self {
        let (w, h) = raster.dimensions();
        let mut canvas = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]));
        for (x, y, px) in raster.enumerate_pixels() {
            canvas.put_pixel(x, y, Rgba([px[0], px[1], px[2], 255]));
        }

        let callouts = layout_callouts(PixelGrid::new(w), geometry, names);
        if font.is_none() {
            log::debug!("no label font loaded; drawing callout boxes without text");
        }

        for callout in &callouts {
            draw_callout(&mut canvas, callout, font);
        }

        Self { canvas, callouts, text_rendered: font.is_some() }
    }

    /// Canvas without its (always opaque) alpha channel.
    pub fn to_rgb(&self) -> RgbImage {
        let (w, h) = self.canvas.dimensions();
        RgbImage::from_fn(w, h, |x, y| {
            let [r, g, b, _] = self.canvas.get_pixel(x, y).0;
            image::Rgb([r, g, b])
        })
    }

    pub fn callout(&self, target: CalloutTarget) -> Option<&Callout> {
        self.callouts.iter().find(|c| c.target == target)
    }
}

fn line_width(line: &str, font: Option<(&FontSystem, FontId)>) -> f32 {
    match font {
        Some((fonts, id)) => fonts.measure_line(line, id, LABEL_FONT_SIZE).x,
        None => line.chars().count() as f32 * LABEL_FONT_SIZE * FALLBACK_ADVANCE,
    }
}

fn draw_callout(canvas: &mut RgbaImage, callout: &Callout, font: Option<(&FontSystem, FontId)>) {
    let widths: Vec<f32> = callout.lines.iter().map(|l| line_width(l, font)).collect();
    let text_w = widths.iter().copied().fold(0.0f32, f32::max);
    let line_h = LABEL_FONT_SIZE * LINE_HEIGHT;
    let text_h = line_h * callout.lines.len() as f32;
    let pad = LABEL_FONT_SIZE * BOX_PAD;

    let cx = callout.center.0 as f32;
    let cy = callout.center.1 as f32;
    let x0 = cx - text_w / 2.0 - pad;
    let y0 = cy - text_h / 2.0 - pad;
    fill_rect(canvas, x0, y0, text_w + 2.0 * pad, text_h + 2.0 * pad, callout.box_color);

    let Some((fonts, id)) = font else { return };
    for (i, (line, w)) in callout.lines.iter().zip(&widths).enumerate() {
        let origin = Vec2::new(cx - w / 2.0, cy - text_h / 2.0 + i as f32 * line_h);
        fonts.draw_line(canvas, line, id, LABEL_FONT_SIZE, callout.text_color, origin);
    }
}

/// Source-over fill of an axis-aligned rect, clipped to the canvas.
fn fill_rect(canvas: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Color) {
    let (cw, ch) = canvas.dimensions();
    let x0 = x.round().max(0.0) as u32;
    let y0 = y.round().max(0.0) as u32;
    let x1 = ((x + w).round().max(0.0) as u32).min(cw);
    let y1 = ((y + h).round().max(0.0) as u32).min(ch);

    for py in y0..y1 {
        for px in x0..x1 {
            let dst = canvas.get_pixel_mut(px, py);
            dst.0 = color.over_rgba8(dst.0);
        }
    }
}
