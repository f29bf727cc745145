//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` against the first video stream and reads its JSON report.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::parse_frame_rate;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter running `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run ffprobe for the first video stream and return its stdout
    async fn query_video_stream(&self, file_path: &Path) -> Result<String, DomainError> {
        let program = self.program.display().to_string();
        debug!(program = %program, file = %file_path.display(), "probing video stream");

        let output = Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height,r_frame_rate,avg_frame_rate",
                "-of",
                "json",
            ])
            .arg(file_path)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DomainError::ToolUnavailable(program.clone())
                } else {
                    DomainError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::Probe(format!(
                "{} could not read {}: {}",
                program,
                file_path.display(),
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| DomainError::Probe(format!("{} produced invalid UTF-8: {}", program, e)))
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_dimensions(&self, file_path: &Path) -> Result<MediaDimensions, DomainError> {
        let json = self.query_video_stream(file_path).await?;
        let dims = dimensions_from_json(&json)?;
        debug!(width = dims.width, height = dims.height, "probed dimensions");
        Ok(dims)
    }

    async fn probe_frame_rate(&self, file_path: &Path) -> Result<FrameRate, DomainError> {
        let json = self.query_video_stream(file_path).await?;
        let rate = frame_rate_from_json(&json)?;
        debug!(fps = rate.value(), "probed frame rate");
        Ok(rate)
    }
}

fn first_video_stream(json: &str) -> Result<FfprobeStream, DomainError> {
    let parsed: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| DomainError::Probe(format!("unreadable ffprobe output: {}", e)))?;

    parsed
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::Probe("no readable video stream".to_string()))
}

/// Width and height from an ffprobe JSON report
pub fn dimensions_from_json(json: &str) -> Result<MediaDimensions, DomainError> {
    let stream = first_video_stream(json)?;
    match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Ok(MediaDimensions { width, height })
        }
        _ => Err(DomainError::Probe(
            "video stream reports no dimensions".to_string(),
        )),
    }
}

/// Frame rate from an ffprobe JSON report, `r_frame_rate` first
pub fn frame_rate_from_json(json: &str) -> Result<FrameRate, DomainError> {
    let stream = first_video_stream(json)?;
    [stream.r_frame_rate, stream.avg_frame_rate]
        .iter()
        .flatten()
        .find_map(|raw| parse_frame_rate(raw))
        .ok_or_else(|| DomainError::Probe("video stream reports no frame rate".to_string()))
}
