//! Resolved run parameters: profile values merged with interactive answers.

use crate::error::EzbxError;
use crate::profile::{non_empty, ConfigProfile};
use crate::prompt::Answers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level operation requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Deploy,
    Route,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Deploy, Action::Route];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Deploy => "deploy",
            Action::Route => "route",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single fallback rule for fields that can come from either source:
/// a non-empty profile value wins, otherwise the collected answer is used.
pub fn fallback(configured: Option<&str>, collected: Option<&str>) -> Option<String> {
    non_empty(configured)
        .or_else(|| non_empty(collected))
        .map(str::to_string)
}

/// Complete parameter set for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameters {
    pub action: Action,
    pub profile_key: String,
    /// Route only: whether the old app is unmapped as well.
    pub unmap: Option<bool>,
    pub app_name: String,
    /// Route with unmap only.
    pub old_app_name: Option<String>,
    /// Deploy only.
    pub build_directory: Option<String>,
    /// Deploy only.
    pub build_command: Option<String>,
    pub profile: ConfigProfile,
}

impl ResolvedParameters {
    /// Merge answers with the selected profile, checking every field the planner consumes
    /// for `action` is present.
    pub fn resolve(
        answers: &Answers,
        profile_key: &str,
        profile: &ConfigProfile,
    ) -> Result<Self, EzbxError> {
        let action = answers.action.ok_or(EzbxError::MissingParameter("action"))?;
        let app_name = non_empty(answers.app_name.as_deref())
            .ok_or(EzbxError::MissingParameter("app name"))?
            .to_string();

        let mut resolved = Self {
            action,
            profile_key: profile_key.to_string(),
            unmap: None,
            app_name,
            old_app_name: None,
            build_directory: None,
            build_command: None,
            profile: profile.clone(),
        };

        match action {
            Action::Deploy => {
                resolved.build_directory = Some(
                    fallback(profile.build_directory(), answers.build_directory.as_deref())
                        .ok_or(EzbxError::MissingParameter("build directory"))?,
                );
                resolved.build_command = Some(
                    fallback(profile.build_command(), answers.build_command.as_deref())
                        .ok_or(EzbxError::MissingParameter("build command"))?,
                );
            }
            Action::Route => {
                let unmap = answers.unmap.unwrap_or(false);
                resolved.unmap = Some(unmap);
                if unmap {
                    resolved.old_app_name = Some(
                        non_empty(answers.old_app_name.as_deref())
                            .ok_or(EzbxError::MissingParameter("old app name"))?
                            .to_string(),
                    );
                }
            }
        }

        Ok(resolved)
    }
}
