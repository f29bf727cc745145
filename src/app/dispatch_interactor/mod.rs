// Dispatch interactor - Runs one action from raw arguments to finished file

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::planner::CommandBuilder;
use crate::ports::*;

/// Interactor for the dispatch use case
pub struct DispatchInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    builder: CommandBuilder,
}

impl DispatchInteractor {
    /// Create new dispatch interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        builder: CommandBuilder,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            builder,
        }
    }

    /// Validate raw positional arguments and run the action they name
    pub async fn dispatch<S: AsRef<str>>(&self, args: &[S]) -> Result<DispatchOutcome, DomainError> {
        let invocation = Invocation::from_args(args)?;
        self.execute(invocation).await
    }

    /// Run an already resolved invocation.
    ///
    /// Stops at the first failing stage: tool check, input check, parameter
    /// parse, probe, build, run.
    pub async fn execute(&self, invocation: Invocation) -> Result<DispatchOutcome, DomainError> {
        info!(action = %invocation.action, parameter = %invocation.parameter, "dispatching");

        self.execute_port.ensure_available().await?;

        if !invocation.input().is_file() {
            return Err(DomainError::validation(format!(
                "input file does not exist: {}",
                invocation.input().display()
            )));
        }

        let param = parse_parameter(invocation.action, &invocation.parameter)?;
        debug!(?param, "parameter accepted");

        match (invocation.action, &param) {
            (Action::Crop, ParsedParameter::Crop(region)) => {
                let source = self.probe_port.probe_dimensions(invocation.input()).await?;
                info!(source = %source, "probed source size");
                check_crop_bounds(region, &source)?;
            }
            (Action::Fps, ParsedParameter::Ratio(target)) => {
                let current = self.probe_port.probe_frame_rate(invocation.input()).await?;
                info!(current = %current, target = %target, "probed frame rate");
                if is_already_at_rate(current, target) {
                    return Ok(DispatchOutcome::AlreadyAtTarget {
                        current,
                        target: target.clone(),
                    });
                }
            }
            _ => {}
        }

        let spec = self.builder.build(&invocation, &param)?;
        let report = self.execute_port.run(&spec).await?;

        if !report.success() {
            warn!(code = ?report.code, "{} failed", self.execute_port.tool_name());
            return Err(DomainError::ExternalFailure {
                tool: self.execute_port.tool_name().to_string(),
                code: report.code,
            });
        }

        info!(output = %spec.path.display(), "action completed");
        Ok(DispatchOutcome::Produced(spec))
    }
}
