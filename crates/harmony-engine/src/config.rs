//! Render configuration.
//!
//! A [`RenderConfig`] is validated once and then treated as immutable; every
//! render call borrows it. Out-of-range settings are rejected, never clamped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distance falloff applied around each source.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FalloffKind {
    #[default]
    Gaussian,
    InverseSquare,
}

impl FalloffKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FalloffKind::Gaussian => "gaussian",
            FalloffKind::InverseSquare => "inverse_square",
        }
    }
}

impl fmt::Display for FalloffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FalloffKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "gaussian" => Ok(FalloffKind::Gaussian),
            "inverse_square" => Ok(FalloffKind::InverseSquare),
            _ => Err(ConfigError::UnknownFalloff(s.to_string())),
        }
    }
}

/// Error returned when a render configuration is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Resolution must be at least one pixel.
    ZeroResolution,
    /// Sigma must be finite and strictly positive.
    InvalidSigma(f32),
    /// Intensity must be finite and strictly positive.
    InvalidIntensity(f32),
    /// Blur radius must be finite and non-negative.
    InvalidBlurRadius(f32),
    /// Edge attenuation must lie in `[0, 1]`.
    InvalidEdgeAttenuation(f32),
    /// Falloff name did not match a known kind.
    UnknownFalloff(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroResolution => write!(f, "resolution must be a positive integer"),
            ConfigError::InvalidSigma(v) => write!(f, "sigma must be finite and > 0 (got {v})"),
            ConfigError::InvalidIntensity(v) => {
                write!(f, "intensity must be finite and > 0 (got {v})")
            }
            ConfigError::InvalidBlurRadius(v) => {
                write!(f, "edge blur radius must be finite and >= 0 (got {v})")
            }
            ConfigError::InvalidEdgeAttenuation(v) => {
                write!(f, "edge attenuation must be within [0, 1] (got {v})")
            }
            ConfigError::UnknownFalloff(s) => {
                write!(f, "unknown falloff '{s}' (expected 'gaussian' or 'inverse_square')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings shared by every render of a renderer instance.
///
/// `falloff` is the default kind; render calls may select another one.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image side length in pixels.
    pub resolution: u32,
    pub falloff: FalloffKind,
    /// Gaussian spread before the 1.8 widening factor.
    pub sigma: f32,
    /// Global brightness multiplier.
    pub intensity: f32,
    /// Standard deviation of the final blur, in pixels.
    pub edge_blur_radius: f32,
    /// Scale applied to the one-pixel ring just outside the triangle.
    pub edge_attenuation: f32,
}

impl RenderConfig {
    pub const DEFAULT_RESOLUTION: u32 = 500;
    pub const DEFAULT_SIGMA: f32 = 0.30;
    pub const DEFAULT_INTENSITY: f32 = 1.2;
    pub const DEFAULT_EDGE_BLUR_RADIUS: f32 = 0.5;
    pub const DEFAULT_EDGE_ATTENUATION: f32 = 0.5;

    /// Builds and validates a configuration.
    pub fn new(
        resolution: u32,
        falloff: FalloffKind,
        sigma: f32,
        intensity: f32,
        edge_blur_radius: f32,
        edge_attenuation: f32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            resolution,
            falloff,
            sigma,
            intensity,
            edge_blur_radius,
            edge_attenuation,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field; used after deserialization as well.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(ConfigError::InvalidSigma(self.sigma));
        }
        if !(self.intensity.is_finite() && self.intensity > 0.0) {
            return Err(ConfigError::InvalidIntensity(self.intensity));
        }
        if !(self.edge_blur_radius.is_finite() && self.edge_blur_radius >= 0.0) {
            return Err(ConfigError::InvalidBlurRadius(self.edge_blur_radius));
        }
        if !(0.0..=1.0).contains(&self.edge_attenuation) {
            return Err(ConfigError::InvalidEdgeAttenuation(self.edge_attenuation));
        }
        Ok(())
    }

    /// Same settings with a different sigma, validated.
    pub fn with_sigma(self, sigma: f32) -> Result<Self, ConfigError> {
        let config = Self { sigma, ..self };
        config.validate()?;
        Ok(config)
    }

    /// Same settings at a different resolution, validated.
    pub fn with_resolution(self, resolution: u32) -> Result<Self, ConfigError> {
        let config = Self { resolution, ..self };
        config.validate()?;
        Ok(config)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: Self::DEFAULT_RESOLUTION,
            falloff: FalloffKind::Gaussian,
            sigma: Self::DEFAULT_SIGMA,
            intensity: Self::DEFAULT_INTENSITY,
            edge_blur_radius: Self::DEFAULT_EDGE_BLUR_RADIUS,
            edge_attenuation: Self::DEFAULT_EDGE_ATTENUATION,
        }
    }
}
