//! Per-render inputs: source strengths and the calibrated white point.
//!
//! Both are slider-bounded user input, so out-of-range values are clamped
//! rather than rejected. A missing channel in deserialized input defaults
//! to 1.0.

use serde::{Deserialize, Serialize};

use crate::paint::Channel;

const fn full() -> f32 {
    1.0
}

/// Relative strengths of the three sources.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceState {
    #[serde(default = "full")]
    pub r: f32,
    #[serde(default = "full")]
    pub g: f32,
    #[serde(default = "full")]
    pub b: f32,
}

impl SourceState {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Equal full-strength state.
    #[inline]
    pub const fn balanced() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Copy with every channel clamped to `[0, 1]`; NaN becomes 0.
    pub fn clamped(&self) -> Self {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self::new(c(self.r), c(self.g), c(self.b))
    }
}

impl Default for SourceState {
    fn default() -> Self {
        Self::balanced()
    }
}

/// State that should render as neutral white at the triangle's centroid.
///
/// Channels are stored clamped to `[MIN_CHANNEL, 1]`; construct through
/// [`CalibrationPoint::new`] or [`CalibrationPoint::clamped`] to keep that
/// invariant.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    #[serde(default = "full")]
    pub r: f32,
    #[serde(default = "full")]
    pub g: f32,
    #[serde(default = "full")]
    pub b: f32,
}

impl CalibrationPoint {
    /// Smallest stored channel value.
    pub const MIN_CHANNEL: f32 = 0.01;

    /// Clamping constructor.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }.clamped()
    }

    /// Neutral calibration `(1, 1, 1)`.
    #[inline]
    pub const fn neutral() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0 }
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Copy with channels clamped to `[MIN_CHANNEL, 1]`; NaN falls to the floor.
    pub fn clamped(&self) -> Self {
        let c = |v: f32| {
            if v.is_nan() {
                Self::MIN_CHANNEL
            } else {
                v.clamp(Self::MIN_CHANNEL, 1.0)
            }
        };
        Self { r: c(self.r), g: c(self.g), b: c(self.b) }
    }

    #[inline]
    pub fn max_channel(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }
}

impl Default for CalibrationPoint {
    fn default() -> Self {
        Self::neutral()
    }
}

impl From<SourceState> for CalibrationPoint {
    /// Adopts a state as the white point ("calibrate to current").
    fn from(state: SourceState) -> Self {
        Self::new(state.r, state.g, state.b)
    }
}
