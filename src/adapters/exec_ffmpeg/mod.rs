//! FFmpeg execution adapter
//!
//! Spawns the ffmpeg binary with a prepared argument vector. ffmpeg's own
//! output is forwarded to the terminal; only the exit status is inspected.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    program: PathBuf,
    name: String,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter running `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let name = program.display().to_string();
        Self { program, name }
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    fn tool_name(&self) -> &str {
        &self.name
    }

    async fn ensure_available(&self) -> Result<(), DomainError> {
        match which::which(&self.program) {
            Ok(path) => {
                debug!(path = %path.display(), "found {}", self.name);
                Ok(())
            }
            Err(_) => Err(DomainError::ToolUnavailable(self.name.clone())),
        }
    }

    async fn run(&self, spec: &OutputSpec) -> Result<ExitReport, DomainError> {
        info!(program = %self.name, args = ?spec.tool_args, "launching");

        let status = Command::new(&self.program)
            .args(&spec.tool_args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DomainError::ToolUnavailable(self.name.clone())
                } else {
                    DomainError::Io(e)
                }
            })?;

        debug!(status = ?status, "{} finished", self.name);
        Ok(ExitReport {
            code: status.code(),
        })
    }
}
