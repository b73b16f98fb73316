//! Process runner: executes one planned step as an external process.
//!
//! The child inherits the terminal's stdin/stdout/stderr so script output is visible live.
//! Its environment is the current process environment with the step's entries layered on
//! top; entries planned without a value are passed as `null`. The parent's own environment
//! is never modified.

use crate::error::EzbxError;
use crate::plan::{StepSpec, NULL_ENV_VALUE};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// How a step's process ended.
#[derive(Debug)]
pub enum StepOutcome {
    Success(i32),
    Failed {
        code: Option<i32>,
        signal: Option<i32>,
    },
    LaunchFailed(std::io::Error),
}

impl StepOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(0) => StepOutcome::Success(0),
            code => StepOutcome::Failed {
                code,
                signal: exit_signal(&status),
            },
        }
    }

    /// Exit code on success, otherwise the matching `Shell` or `Launch` error for `step`.
    pub fn into_result(self, step: &StepSpec) -> Result<i32, EzbxError> {
        match self {
            StepOutcome::Success(code) => Ok(code),
            StepOutcome::Failed { code, signal } => Err(EzbxError::Shell {
                step: step.kind.to_string(),
                code,
                signal,
            }),
            StepOutcome::LaunchFailed(source) => Err(EzbxError::Launch {
                step: step.kind.to_string(),
                script: step.script_path.clone(),
                source,
            }),
        }
    }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Executes a single step and waits for it to finish.
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(&self, step: &StepSpec) -> StepOutcome;
}

/// Runs step scripts through a shell, e.g. `sh ./ezbx/login.sh`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    fn command(&self, step: &StepSpec) -> Command {
        let mut command = Command::new(&self.shell);
        command
            .arg(&step.script_path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        for (key, value) in &step.environment {
            command.env(key, value.as_deref().unwrap_or(NULL_ENV_VALUE));
        }
        command
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

#[async_trait]
impl StepRunner for ShellRunner {
    async fn run(&self, step: &StepSpec) -> StepOutcome {
        // `sh missing.sh` still spawns; a missing script is a launch failure, not a shell exit.
        if let Err(err) = tokio::fs::metadata(&step.script_path).await {
            return StepOutcome::LaunchFailed(err);
        }

        debug!(
            step = %step.kind,
            shell = %self.shell,
            script = %step.script_path.display(),
            "Spawning step"
        );
        match self.command(step).status().await {
            Ok(status) => StepOutcome::from_status(status),
            Err(err) => StepOutcome::LaunchFailed(err),
        }
    }
}
