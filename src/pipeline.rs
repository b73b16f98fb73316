//! Pipeline executor: runs planned steps one after another and stops at the first failure.
//!
//! Nothing is rolled back. A failure mid-route leaves earlier routes applied and later ones
//! unattempted; the reported error names the step that failed.

use crate::error::EzbxError;
use crate::plan::StepSpec;
use crate::runner::StepRunner;
use std::time::Instant;
use tracing::{error, info};

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct RunResult {
    /// Exit code of the last step that completed successfully.
    pub final_exit_code: Option<i32>,
    /// Whole seconds from just before the first step to just after the last attempted one.
    pub elapsed_seconds: u64,
    /// Number of steps that were started, including a failed one.
    pub steps_attempted: usize,
    pub failure: Option<EzbxError>,
}

impl RunResult {
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    /// `Ok(final exit code)` for a clean run, otherwise the first step's error.
    pub fn into_result(self) -> Result<i32, EzbxError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.final_exit_code.unwrap_or(0)),
        }
    }
}

/// Executes steps strictly sequentially through a [`StepRunner`].
pub struct PipelineExecutor<R: StepRunner> {
    runner: R,
}

impl<R: StepRunner> PipelineExecutor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub async fn execute(&self, steps: Vec<StepSpec>) -> RunResult {
        let total = steps.len();
        let mut final_exit_code = None;
        let mut steps_attempted = 0usize;
        let mut failure = None;

        let start = Instant::now();
        for (index, step) in steps.into_iter().enumerate() {
            steps_attempted += 1;
            info!(
                step = %step.kind,
                index = index + 1,
                total,
                script = %step.script_path.display(),
                "Step started"
            );
            match self.runner.run(&step).await.into_result(&step) {
                Ok(code) => {
                    info!(step = %step.kind, code, "Step completed");
                    final_exit_code = Some(code);
                }
                Err(err) => {
                    error!(step = %step.kind, error = %err, "Step failed, stopping pipeline");
                    failure = Some(err);
                    break;
                }
            }
        }
        let elapsed_seconds = start.elapsed().as_secs();

        RunResult {
            final_exit_code,
            elapsed_seconds,
            steps_attempted,
            failure,
        }
    }
}
