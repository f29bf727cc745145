// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for querying media metadata without decoding the file
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Pixel size of the first video stream
    async fn probe_dimensions(&self, file_path: &Path) -> Result<MediaDimensions, DomainError>;

    /// Frame rate of the first video stream, normalised to two decimals
    async fn probe_frame_rate(&self, file_path: &Path) -> Result<FrameRate, DomainError>;
}

/// Result of one finished tool run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl ExitReport {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for running the external media tool
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Name shown in diagnostics
    fn tool_name(&self) -> &str;

    /// Fail with `ToolUnavailable` unless the tool can be launched
    async fn ensure_available(&self) -> Result<(), DomainError>;

    /// Run the tool with `spec.tool_args` and wait for it to exit
    async fn run(&self, spec: &OutputSpec) -> Result<ExitReport, DomainError>;
}
