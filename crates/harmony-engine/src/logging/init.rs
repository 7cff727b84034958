use std::sync::Once;

use env_logger::WriteStyle;
use log::LevelFilter;

/// Backend settings for [`init_logging`].
///
/// Filter precedence: `filter`, then `RUST_LOG`, then `fallback_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directive string, e.g. `"harmony_engine::render=debug"`.
    pub filter: Option<String>,
    pub fallback_level: LevelFilter,
    pub write_style: WriteStyle,
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { filter: Some(filter.into()), ..Self::default() }
    }

    /// The directive string that will be handed to the builder, if any.
    fn directives(&self, rust_log: Option<String>) -> Option<String> {
        self.filter.clone().or(rust_log).filter(|s| !s.trim().is_empty())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            fallback_level: LevelFilter::Info,
            write_style: WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global backend. Only the first call has any
/// effect, and a logger installed by someone else is left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.directives(std::env::var("RUST_LOG").ok()) {
            Some(directives) => {
                builder.parse_filters(&directives);
            }
            None => {
                builder.filter_level(config.fallback_level);
            }
        }
        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logger installed");
        }
    });
}
