//! CLI module for ffverb
//!
//! Parses flags with clap and leaves the three positional arguments for the
//! dispatcher, which owns their validation.

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod usage;

/// Number of positional arguments every invocation takes
pub const POSITIONAL_ARGS: usize = 3;

/// ffverb - short verbs for common ffmpeg jobs
#[derive(Parser, Debug)]
#[command(name = "ffverb")]
#[command(about = "Short verbs for common ffmpeg jobs")]
#[command(version)]
#[command(after_help = usage::ACTIONS_HINT)]
pub struct Cli {
    /// Config file (default: ./ffverb.toml when present)
    #[arg(long, env = "FFVERB_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error, off)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// ffmpeg binary to run
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// ffprobe binary to run
    #[arg(long, value_name = "PATH")]
    pub ffprobe: Option<String>,

    /// <action> <param> <file>
    #[arg(value_name = "ARGS", num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Whether exactly three positional arguments were given
    pub fn has_positional_args(&self) -> bool {
        self.args.len() == POSITIONAL_ARGS
    }
}
