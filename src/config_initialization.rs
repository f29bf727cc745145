//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::Result;

use crate::adapters::toml_config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::cli::Cli;

/// Build the effective configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<AppConfig> {
    initialize_with_env(cli, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration`] with an injectable environment
pub fn initialize_with_env<F>(cli: &Cli, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    // Steps 1 and 2: defaults, overlaid by a config file if one applies
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            AppConfig::load_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => AppConfig::default(),
    };

    // Step 3: environment variables
    config.apply_env(lookup)?;

    // Step 4: command-line flags
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        config.ffmpeg = ffmpeg.clone();
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.ffprobe = ffprobe.clone();
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_cli_overrides_env_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[ffverb]\nffmpeg = \"from-file\"\nlog_level = \"warn\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "ffverb",
            "--config",
            path.to_str().unwrap(),
            "--ffmpeg",
            "from-cli",
        ])
        .unwrap();

        let config = initialize_with_env(&cli, |key| match key {
            "FFVERB_FFMPEG" => Some("from-env".to_string()),
            "FFVERB_FFPROBE" => Some("probe-from-env".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.ffmpeg, "from-cli");
        assert_eq!(config.ffprobe, "probe-from-env");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let cli = Cli::try_parse_from(["ffverb", "--config", "/no/such/ffverb.toml"]).unwrap();
        assert!(initialize_with_env(&cli, no_env).is_err());
    }

    #[test]
    fn test_invalid_cli_level_fails_validation() {
        let cli = Cli::try_parse_from(["ffverb", "--log-level", "shouty"]).unwrap();
        assert!(initialize_with_env(&cli, no_env).is_err());
    }
}
