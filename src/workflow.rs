//! Top-level run: prompt, resolve, plan, confirm, execute.
//!
//! Every step before [`Workflow::execute`] is free of side effects on the platform, so an
//! abort at any prompt (including the confirmation) runs zero external processes.

use crate::error::EzbxError;
use crate::params::{Action, ResolvedParameters};
use crate::pipeline::PipelineExecutor;
use crate::plan::{is_confirmed, plan, ActionPlan, ScriptPaths};
use crate::profile::ProfileSet;
use crate::prompt::{ProgramInfo, PromptSequencer, Prompter};
use crate::runner::StepRunner;
use tracing::{debug, info, warn};

/// Parameters and plan for a run that has not been confirmed yet.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub params: ResolvedParameters,
    pub plan: ActionPlan,
}

/// Successful end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub app_name: String,
    pub action: Action,
    pub exit_code: i32,
    pub elapsed_seconds: u64,
}

pub struct Workflow<P: Prompter, R: StepRunner> {
    prompter: P,
    executor: PipelineExecutor<R>,
    scripts: ScriptPaths,
    program: ProgramInfo,
}

impl<P: Prompter, R: StepRunner> Workflow<P, R> {
    pub fn new(prompter: P, runner: R, scripts: ScriptPaths, program: ProgramInfo) -> Self {
        Self {
            prompter,
            executor: PipelineExecutor::new(runner),
            scripts,
            program,
        }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn runner(&self) -> &R {
        self.executor.runner()
    }

    /// Ask the parameter questions and plan the chosen action.
    pub fn prepare(&self, profiles: &ProfileSet) -> Result<PreparedRun, EzbxError> {
        let sequencer = PromptSequencer::new(&self.prompter, profiles, &self.program);
        let answers = sequencer.collect()?;

        let key = answers
            .profile_key
            .clone()
            .ok_or(EzbxError::MissingParameter("config key"))?;
        let profile = profiles.resolve(&key)?;
        let params = ResolvedParameters::resolve(&answers, &key, profile)?;
        let plan = plan(&params, &self.scripts)?;
        debug!(
            action = %params.action,
            profile = %key,
            steps = plan.steps.len(),
            "Planned run"
        );
        Ok(PreparedRun { params, plan })
    }

    /// Ask for confirmation; anything but `y`/`yes` aborts.
    pub fn confirm(&self, profiles: &ProfileSet) -> Result<(), EzbxError> {
        let answer = PromptSequencer::new(&self.prompter, profiles, &self.program).confirm()?;
        if is_confirmed(&answer) {
            Ok(())
        } else {
            warn!(answer = %answer, "Run not confirmed");
            Err(EzbxError::user_abort())
        }
    }

    /// Run the planned steps, failing fast on the first step error.
    pub async fn execute(&self, prepared: PreparedRun) -> Result<Completion, EzbxError> {
        let PreparedRun { params, plan } = prepared;
        info!(
            app_name = %params.app_name,
            action = %params.action,
            steps = plan.steps.len(),
            "Starting pipeline"
        );
        let result = self.executor.execute(plan.steps).await;
        let elapsed_seconds = result.elapsed_seconds;
        let exit_code = result.into_result()?;
        Ok(Completion {
            app_name: params.app_name,
            action: params.action,
            exit_code,
            elapsed_seconds,
        })
    }

    /// Full interactive run. `show_summary` renders the plan before the confirmation prompt.
    pub async fn run<F>(&self, profiles: &ProfileSet, show_summary: F) -> Result<Completion, EzbxError>
    where
        F: FnOnce(&PreparedRun),
    {
        let prepared = self.prepare(profiles)?;
        show_summary(&prepared);
        self.confirm(profiles)?;
        self.execute(prepared).await
    }
}
