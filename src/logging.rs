//! Console logging for the viewer.
//!
//! Everything in aviary logs through `log`. [`init_logging`] wires that up to
//! `env_logger` on stderr; `main` calls it before opening the window.

use std::sync::Once;

/// Which messages reach the console, and whether they are colored.
///
/// `env_filter` takes `env_logger` directives such as `"aviary=debug"`.
/// Left unset, `RUST_LOG` decides, and without that the viewer logs at `info`
/// with the GPU stack held to warnings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// The directives to install: the configured filter, else `RUST_LOG`.
    /// `None` means the built-in defaults.
    pub fn directives(&self) -> Option<String> {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
    }
}

static INIT: Once = Once::new();

/// Installs the logger for the process. Only the first call does anything.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.directives() {
            Some(directives) => {
                builder.parse_filters(&directives);
            }
            None => {
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }
        builder.write_style(config.write_style);

        // a test harness may already own the global logger
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::new().filter("debug"));
        init_logging(LoggingConfig::default());
        log::info!("still logging");
    }

    #[test]
    fn filter_overrides_environment() {
        let config = LoggingConfig::new().filter("aviary=trace");
        assert_eq!(config.env_filter.as_deref(), Some("aviary=trace"));
        assert_eq!(config.directives().as_deref(), Some("aviary=trace"));
    }
}
