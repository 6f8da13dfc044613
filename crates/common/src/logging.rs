//! Logging and tracing initialization.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

const FALLBACK_DIRECTIVE: &str = "info";

/// Filter for the subscriber: `RUST_LOG` when set and valid, then the
/// configured level, then `info`.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE))
}

/// Install the global tracing subscriber. Later calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    let builder = fmt::Subscriber::builder().with_env_filter(env_filter(config));
    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.compact().with_target(true).finish())
    };
    if installed.is_ok() {
        tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    }
}

pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_default_logging();
        init_logging(&LoggingConfig {
            level: "debug".to_string(),
            json: true,
        });
        tracing::info!("still logging after second init");
    }

    #[test]
    fn test_invalid_level_falls_back() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = env_filter(&LoggingConfig {
            level: "clipdeck=verbose[".to_string(),
            json: false,
        });
        assert_eq!(filter.to_string(), FALLBACK_DIRECTIVE);
    }
}
