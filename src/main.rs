//! ffverb
//!
//! Short verbs for common ffmpeg jobs.
//!
//! # Usage
//!
//! ```bash
//! ffverb clip 00:01:23-00:02:45 talk.mp4
//! ffverb crop 100:50-1280:720 screen.mkv
//! ffverb speed 2 lecture.mp4
//! ```

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use ffverb::cli::{commands, usage, Cli};
use ffverb::DomainError;

/// Main entry point for the ffverb CLI
#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            print!("{}", usage::usage_text());
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    if !cli.has_positional_args() {
        print!("{}", usage::usage_text());
        return ExitCode::FAILURE;
    }

    match commands::execute(cli).await {
        Ok(outcome) => {
            println!("{}", commands::describe_outcome(&outcome));
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err
                .downcast_ref::<DomainError>()
                .is_some_and(DomainError::wants_usage)
            {
                print!("{}", usage::usage_text());
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
