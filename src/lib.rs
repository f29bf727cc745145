//! ffverb Library
//!
//! Turns short verb/parameter pairs into ffmpeg invocations: validate the
//! parameter, probe the source when the action needs it, name the output and
//! build the argument vector. All media work is left to ffmpeg.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod planner;
pub mod ports;

// Re-export commonly used types
pub use domain::errors::{DomainError, DomainResult};
pub use domain::model::{Action, DispatchOutcome, Invocation, OutputSpec, ParsedParameter};
pub use planner::{BuildOptions, CommandBuilder};
