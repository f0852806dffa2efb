//! Tracing subscriber initialisation.
//!
//! The filter comes from `RUST_LOG`, falling back to
//! [`DEFAULT_FILTER`]. `LOG_FORMAT=json` switches to one JSON object per event.

use std::str::FromStr;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,taskdesk=debug,tower_http=debug";

/// Output format of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl LogFormat {
    /// Reads `LOG_FORMAT`, falling back to [`LogFormat::Pretty`].
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Installs the global tracing subscriber.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("json", Ok(LogFormat::Json))]
    #[case(" JSON ", Ok(LogFormat::Json))]
    #[case("pretty", Ok(LogFormat::Pretty))]
    #[case("text", Ok(LogFormat::Pretty))]
    fn test_log_format_parses(#[case] input: &str, #[case] expected: Result<LogFormat, String>) {
        assert_eq!(input.parse::<LogFormat>(), expected);
    }

    #[rstest]
    fn test_log_format_rejects_unknown() {
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[rstest]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
