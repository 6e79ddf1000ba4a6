use std::sync::Once;

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

/// How composition diagnostics are reported.
///
/// `env_filter` uses `env_logger` directives, e.g.
/// `"vellum_engine::compose=debug,vellum_engine::svg=warn"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
    /// Route output through the test harness capture.
    pub capture: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: WriteStyle::Auto, capture: false }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter; `RUST_LOG` is not consulted.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { env_filter: Some(filter.into()), ..Self::default() }
    }

    /// Captured, uncolored output at `debug`.
    pub fn for_tests() -> Self {
        Self {
            env_filter: Some("debug".to_owned()),
            write_style: WriteStyle::Never,
            capture: true,
        }
    }

    /// Filter directives in effect: explicit filter, then `RUST_LOG`.
    fn directives(&self) -> Option<String> {
        self.env_filter.clone().or_else(|| std::env::var("RUST_LOG").ok())
    }

    fn builder(&self) -> Builder {
        let mut builder = Builder::new();
        match self.directives() {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(LevelFilter::Info),
        };
        builder.write_style(self.write_style).is_test(self.capture);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the global logger on first call; later calls do nothing.
///
/// A logger installed by someone else first is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig::with_filter("warn");
        assert_eq!(config.directives().as_deref(), Some("warn"));
        assert!(!config.capture);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::for_tests());
        init_logging(LoggingConfig::default());
        assert!(log::max_level() >= LevelFilter::Error);
    }
}
