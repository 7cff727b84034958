use core::fmt;

use super::LinearRgb;

/// One of the three sources of the harmony field.
///
/// Each source radiates exactly one primary; blending happens only through
/// additive accumulation of the three contributions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Channels in source order (left-edge, right-edge, bottom-edge midpoint).
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Pure basis color of this source.
    #[inline]
    pub const fn basis(self) -> LinearRgb {
        match self {
            Channel::Red => LinearRgb::new(1.0, 0.0, 0.0),
            Channel::Green => LinearRgb::new(0.0, 1.0, 0.0),
            Channel::Blue => LinearRgb::new(0.0, 0.0, 1.0),
        }
    }

    /// Display name of the primary color.
    pub const fn color_name(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }

    /// Name of the additive secondary formed with `other`, if the two differ.
    pub fn secondary_name(self, other: Channel) -> Option<&'static str> {
        use Channel::*;
        match (self, other) {
            (Red, Green) | (Green, Red) => Some("Yellow"),
            (Red, Blue) | (Blue, Red) => Some("Magenta"),
            (Green, Blue) | (Blue, Green) => Some("Cyan"),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_has_single_lit_component() {
        for ch in Channel::ALL {
            let b = ch.basis().to_array();
            for (i, v) in b.iter().enumerate() {
                assert_eq!(*v, if i == ch.index() { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn secondary_names_are_symmetric() {
        assert_eq!(Channel::Red.secondary_name(Channel::Green), Some("Yellow"));
        assert_eq!(Channel::Blue.secondary_name(Channel::Red), Some("Magenta"));
        assert_eq!(Channel::Green.secondary_name(Channel::Blue), Some("Cyan"));
        assert_eq!(Channel::Green.secondary_name(Channel::Green), None);
    }
}
