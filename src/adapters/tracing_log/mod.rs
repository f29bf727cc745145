// Tracing log adapter - Structured logging using tracing crate

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(DomainError::Config(format!(
                "invalid log format '{}', expected pretty or json",
                other
            ))),
        }
    }
}

/// Validate a level name (trace, debug, info, warn, error, off)
pub fn parse_level(level: &str) -> Result<tracing::level_filters::LevelFilter, DomainError> {
    level.parse().map_err(|_| {
        DomainError::Config(format!(
            "invalid log level '{}', expected trace, debug, info, warn, error or off",
            level
        ))
    })
}

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is harmless.
pub fn init(level: &str, format: LogFormat) -> Result<(), DomainError> {
    let default_level = parse_level(level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = installed {
        // Logs through whichever subscriber is already active
        tracing::debug!(error = %e, "keeping existing tracing subscriber");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_level_validation() {
        assert!(parse_level("debug").is_ok());
        assert!(parse_level("WARN").is_ok());
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_init_twice_is_ok() {
        assert!(init("info", LogFormat::Pretty).is_ok());
        assert!(init("debug", LogFormat::Json).is_ok());
    }
}
