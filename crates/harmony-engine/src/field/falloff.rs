use crate::config::{FalloffKind, RenderConfig};

/// Widening applied to the configured gaussian sigma.
const GAUSSIAN_SPREAD: f32 = 1.8;
/// Inverse-square numerator scale.
const INVERSE_SQUARE_SCALE: f32 = 0.8;
/// Inverse-square softening term; keeps the source point finite.
const INVERSE_SQUARE_EPSILON: f32 = 0.05;

/// Falloff evaluator bound to one render's sigma and intensity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Falloff {
    kind: FalloffKind,
    intensity: f32,
    /// `2 * (sigma * GAUSSIAN_SPREAD)^2`, unused for inverse-square.
    two_spread_sq: f32,
}

impl Falloff {
    pub fn new(kind: FalloffKind, sigma: f32, intensity: f32) -> Self {
        let spread = sigma * GAUSSIAN_SPREAD;
        Self {
            kind,
            intensity,
            two_spread_sq: 2.0 * spread * spread,
        }
    }

    /// Evaluator for `config` with `kind` overriding the configured default.
    pub fn from_config(config: &RenderConfig, kind: FalloffKind) -> Self {
        Self::new(kind, config.sigma, config.intensity)
    }

    #[inline]
    pub fn kind(&self) -> FalloffKind {
        self.kind
    }

    /// Contribution at squared distance `d2` from a source.
    #[inline]
    pub fn eval(&self, d2: f32) -> f32 {
        match self.kind {
            FalloffKind::Gaussian => self.intensity * (-d2 / self.two_spread_sq).exp(),
            FalloffKind::InverseSquare => {
                self.intensity * INVERSE_SQUARE_SCALE / (d2 + INVERSE_SQUARE_EPSILON)
            }
        }
    }
}
