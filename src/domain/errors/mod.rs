// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Wrong number of positional arguments
    #[error("Usage error: {0}")]
    Usage(String),

    /// Action name outside the supported set
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// Parameter does not match the grammar or semantics of its action
    #[error("Invalid parameter: {0}")]
    Validation(String),

    /// Crop rectangle not contained in the probed source frame
    #[error(
        "Crop region {w}x{h} at ({x},{y}) does not fit the {width}x{height} source; \
         max width from this offset is {max_width}, max height is {max_height}"
    )]
    Bounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    /// ffmpeg or ffprobe missing from the system
    #[error("Required tool not available: {0}")]
    ToolUnavailable(String),

    /// Probe ran but the answer was unusable
    #[error("Probe failed: {0}")]
    Probe(String),

    /// Child process exited non-zero
    #[error("{tool} exited with {}", describe_code(.code))]
    ExternalFailure { tool: String, code: Option<i32> },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl DomainError {
    /// Build a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Whether the CLI should show the usage table alongside the message
    pub fn wants_usage(&self) -> bool {
        matches!(self, DomainError::Usage(_))
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = std::result::Result<T, DomainError>;
