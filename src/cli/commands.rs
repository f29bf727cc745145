//! Command implementations

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::tracing_log;
use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::Cli;
use crate::config_initialization::initialize_configuration;
use crate::domain::model::{DispatchOutcome, Invocation};

/// Resolve the action, then load settings, start logging and run it.
///
/// The argument count and action name are checked before any config file is
/// read.
pub async fn execute(cli: Cli) -> Result<DispatchOutcome> {
    let invocation = Invocation::from_args(&cli.args)?;

    let config = initialize_configuration(&cli).context("Failed to load configuration")?;
    tracing_log::init(&config.log_level, config.log_format)?;
    debug!(?config, "effective configuration");

    let container = DefaultAppContainer::new(&config);
    let outcome = container.dispatch_interactor().execute(invocation).await?;

    info!("ffverb completed successfully");
    Ok(outcome)
}

/// User-facing line for a finished dispatch
pub fn describe_outcome(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Produced(spec) => format!("Output: {}", spec.path.display()),
        DispatchOutcome::AlreadyAtTarget { current, target } => format!(
            "Already at {} fps (source is {} fps), nothing to do",
            target, current
        ),
    }
}
