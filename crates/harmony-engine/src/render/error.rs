use std::fmt;

use crate::config::ConfigError;

/// Error returned by renders that encode or write their output.
#[derive(Debug)]
pub enum RenderError {
    /// Settings were rejected before any pixel work started.
    Config(ConfigError),
    /// The raster could not be encoded or written.
    Encode(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Config(e) => write!(f, "invalid render configuration: {e}"),
            RenderError::Encode(e) => write!(f, "failed to encode image: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Config(e) => Some(e),
            RenderError::Encode(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RenderError {
    fn from(e: ConfigError) -> Self {
        RenderError::Config(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Encode(e)
    }
}
