use serde::{Deserialize, Serialize};

use crate::coords::{PixelGrid, Vec2};
use crate::geometry::TriangleGeometry;
use crate::paint::{Channel, Color};

/// Human names of the concerns carried by each source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceNames {
    pub red: String,
    pub green: String,
    pub blue: String,
}

impl SourceNames {
    pub fn new(red: impl Into<String>, green: impl Into<String>, blue: impl Into<String>) -> Self {
        Self { red: red.into(), green: green.into(), blue: blue.into() }
    }

    pub fn get(&self, channel: Channel) -> &str {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

impl Default for SourceNames {
    fn default() -> Self {
        Self::new("Privacy", "Performance", "Personalization")
    }
}

/// Which feature of the triangle a callout annotates.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CalloutTarget {
    /// Vertex index in `[top, bottom_left, bottom_right]` order.
    Vertex(usize),
    /// Source midpoint.
    Source(Channel),
    Centroid,
}

/// One text annotation on the labeled diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub target: CalloutTarget,
    /// Label lines, top to bottom.
    pub lines: Vec<String>,
    /// Pixel the callout refers to.
    pub anchor: (i32, i32),
    /// Centre of the label box, `anchor` plus the fixed offset.
    pub center: (i32, i32),
    pub text_color: Color,
    pub box_color: Color,
}

impl Callout {
    /// Label as a single newline-joined string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Box alpha shared by every callout.
const BOX_ALPHA: f32 = 0.7;

/// Label offsets in pixels (y down), per vertex.
const VERTEX_OFFSETS: [(i32, i32); 3] = [(0, 25), (-25, -20), (25, -20)];

/// Label offsets in pixels (y down), per source in channel order.
const SOURCE_OFFSETS: [(i32, i32); 3] = [(30, 5), (-30, 5), (0, -30)];

/// The seven callouts of the labeled diagram for an `N × N` raster.
///
/// Vertices carry the secondary color of their two adjacent sources,
/// midpoints the primary and its source name, and the centroid the balance
/// label.
pub fn layout_callouts(
    grid: PixelGrid,
    geometry: &TriangleGeometry,
    names: &SourceNames,
) -> Vec<Callout> {
    let dark_box = Color::from_straight(0.0, 0.0, 0.0, BOX_ALPHA);
    let light_box = Color::from_straight(1.0, 1.0, 1.0, BOX_ALPHA);
    let place = |p: Vec2, (dx, dy): (i32, i32)| {
        let anchor = grid.to_pixel(p);
        (anchor, (anchor.0 + dx, anchor.1 + dy))
    };

    let mut callouts = Vec::with_capacity(7);

    for (i, &vertex) in geometry.vertices.iter().enumerate() {
        let (a, b) = TriangleGeometry::vertex_sources(i);
        let secondary = a.secondary_name(b).unwrap_or("Mixed");
        let (anchor, center) = place(vertex, VERTEX_OFFSETS[i]);
        callouts.push(Callout {
            target: CalloutTarget::Vertex(i),
            lines: vec![
                secondary.to_string(),
                format!("({}+{})", names.get(a), names.get(b)),
            ],
            anchor,
            center,
            text_color: Color::white(),
            box_color: dark_box,
        });
    }

    for ch in Channel::ALL {
        let (anchor, center) = place(geometry.source(ch), SOURCE_OFFSETS[ch.index()]);
        callouts.push(Callout {
            target: CalloutTarget::Source(ch),
            lines: vec![ch.color_name().to_string(), format!("({})", names.get(ch))],
            anchor,
            center,
            text_color: Color::white(),
            box_color: dark_box,
        });
    }

    let (anchor, center) = place(geometry.centroid, (0, 0));
    callouts.push(Callout {
        target: CalloutTarget::Centroid,
        lines: vec!["White".to_string(), "(Balance)".to_string()],
        anchor,
        center,
        text_color: Color::black(),
        box_color: light_box,
    });

    callouts
}
