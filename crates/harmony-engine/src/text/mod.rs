//! Font loading, measurement and CPU glyph compositing for diagram labels.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};

/// First readable font from the usual system locations, for tests that need
/// real glyphs. `None` on machines without one; such tests return early.
#[cfg(test)]
pub(crate) fn system_font_bytes() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}
