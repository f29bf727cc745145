// TOML config adapter - Read-only settings from a TOML file and environment

use std::path::Path;

use serde::Deserialize;

use crate::adapters::tracing_log::{self, LogFormat};
use crate::domain::errors::*;
use crate::planner::{BuildOptions, ClipMode};

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "ffverb.toml";
/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "FFVERB_CONFIG";

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// ffmpeg binary name or path
    pub ffmpeg: String,
    /// ffprobe binary name or path
    pub ffprobe: String,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Replace an existing output file
    pub overwrite: bool,
    pub clip_mode: ClipMode,
    /// Round resize output to even dimensions
    pub even_dimensions: bool,
    pub sdr_crf: u8,
    pub sdr_preset: String,
    pub capture_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        let build = BuildOptions::default();
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            overwrite: build.overwrite,
            clip_mode: build.clip_mode,
            even_dimensions: build.even_dimensions,
            sdr_crf: build.sdr_crf,
            sdr_preset: build.sdr_preset,
            capture_quality: build.capture_quality,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    ffverb: AppConfig,
}

impl AppConfig {
    /// Parse the `[ffverb]` table of a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, DomainError> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(file.ffverb)
    }

    /// Read and parse a config file
    pub fn load_file(path: &Path) -> Result<Self, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `FFVERB_*` overrides; `lookup` returns the variable's value if set
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup("FFVERB_FFMPEG") {
            self.ffmpeg = value;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_FFPROBE") {
            self.ffprobe = value;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_LOG_LEVEL") {
            self.log_level = value;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_LOG_FORMAT") {
            self.log_format = value.parse()?;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_OVERWRITE") {
            self.overwrite = parse_env("FFVERB_OVERWRITE", &value)?;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_CLIP_MODE") {
            self.clip_mode = value.parse()?;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_EVEN_DIMENSIONS") {
            self.even_dimensions = parse_env("FFVERB_EVEN_DIMENSIONS", &value)?;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_SDR_CRF") {
            self.sdr_crf = parse_env("FFVERB_SDR_CRF", &value)?;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_SDR_PRESET") {
            self.sdr_preset = value;
            applied += 1;
        }
        if let Some(value) = lookup("FFVERB_CAPTURE_QUALITY") {
            self.capture_quality = parse_env("FFVERB_CAPTURE_QUALITY", &value)?;
            applied += 1;
        }

        Ok(applied)
    }

    /// Reject values ffmpeg would refuse anyway
    pub fn validate(&self) -> Result<(), DomainError> {
        tracing_log::parse_level(&self.log_level)?;

        if self.ffmpeg.trim().is_empty() || self.ffprobe.trim().is_empty() {
            return Err(DomainError::Config(
                "ffmpeg and ffprobe paths must not be empty".to_string(),
            ));
        }
        if self.sdr_crf > 51 {
            return Err(DomainError::Config(format!(
                "sdr_crf must be between 0 and 51, got {}",
                self.sdr_crf
            )));
        }
        if !(1..=31).contains(&self.capture_quality) {
            return Err(DomainError::Config(format!(
                "capture_quality must be between 1 and 31, got {}",
                self.capture_quality
            )));
        }
        if self.sdr_preset.trim().is_empty() {
            return Err(DomainError::Config("sdr_preset must not be empty".to_string()));
        }

        Ok(())
    }

    /// Settings relevant to command planning
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            overwrite: self.overwrite,
            clip_mode: self.clip_mode,
            even_dimensions: self.even_dimensions,
            sdr_crf: self.sdr_crf,
            sdr_preset: self.sdr_preset.clone(),
            capture_quality: self.capture_quality,
        }
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DomainError::Config(format!("Invalid value for {}: {}", key, e)))
}
