//! Render presets loaded from TOML, merged with command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use harmony_engine::diagram::SourceNames;
use harmony_engine::{CalibrationPoint, ConfigError, FalloffKind, RenderConfig, SourceState};
use serde::Deserialize;

/// `[render]` table. Every key is optional; unset keys fall back to the
/// next layer (preset, then engine defaults).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub resolution: Option<u32>,
    pub falloff: Option<FalloffKind>,
    pub sigma: Option<f32>,
    pub intensity: Option<f32>,
    pub edge_blur_radius: Option<f32>,
    pub edge_attenuation: Option<f32>,
    pub adaptive_sigma: Option<bool>,
}

impl RenderSettings {
    /// `self` with any field set in `over` replaced.
    pub fn overlay(&self, over: &RenderSettings) -> RenderSettings {
        RenderSettings {
            resolution: over.resolution.or(self.resolution),
            falloff: over.falloff.or(self.falloff),
            sigma: over.sigma.or(self.sigma),
            intensity: over.intensity.or(self.intensity),
            edge_blur_radius: over.edge_blur_radius.or(self.edge_blur_radius),
            edge_attenuation: over.edge_attenuation.or(self.edge_attenuation),
            adaptive_sigma: over.adaptive_sigma.or(self.adaptive_sigma),
        }
    }

    /// Validated engine config; unset fields take engine defaults.
    pub fn to_config(&self) -> Result<RenderConfig, ConfigError> {
        let d = RenderConfig::default();
        RenderConfig::new(
            self.resolution.unwrap_or(d.resolution),
            self.falloff.unwrap_or(d.falloff),
            self.sigma.unwrap_or(d.sigma),
            self.intensity.unwrap_or(d.intensity),
            self.edge_blur_radius.unwrap_or(d.edge_blur_radius),
            self.edge_attenuation.unwrap_or(d.edge_attenuation),
        )
    }

    /// Adaptive sigma is on unless explicitly disabled.
    pub fn adaptive(&self) -> bool {
        self.adaptive_sigma.unwrap_or(true)
    }
}

/// A saved rendering preset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preset {
    pub render: RenderSettings,
    pub state: Option<SourceState>,
    pub calibration: Option<CalibrationPoint>,
    pub labels: Option<SourceNames>,
}

impl Preset {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        let preset = Self::from_toml_str(&text)
            .with_context(|| format!("parsing preset {}", path.display()))?;
        log::debug!("loaded preset {}: {preset:?}", path.display());
        Ok(preset)
    }

    pub fn state(&self) -> SourceState {
        self.state.unwrap_or_default()
    }
}
