//! Structured logging setup.
//!
//! Filtering follows `RUST_LOG` (default `info`). `LOG_FORMAT=json` switches
//! to one JSON object per line; anything else gives human-readable output.

use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Unknown or missing values mean text.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Install the global tracing subscriber.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = LogFormat::from_value(std::env::var("LOG_FORMAT").ok().as_deref());

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_case_insensitive() {
        assert_eq!(LogFormat::from_value(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::from_value(Some(" json ")), LogFormat::Json);
    }

    #[test]
    fn anything_else_is_text() {
        assert_eq!(LogFormat::from_value(None), LogFormat::Text);
        assert_eq!(LogFormat::from_value(Some("pretty")), LogFormat::Text);
    }
}
