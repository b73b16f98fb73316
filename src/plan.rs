//! Action planning: turns resolved parameters into a confirmation summary and the ordered
//! list of external steps to run.

use crate::error::EzbxError;
use crate::params::{Action, ResolvedParameters};
use crate::profile::ConfigProfile;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Placeholder passed as `HOSTNAME` for routes without a host name.
pub const EMPTY_HOSTNAME: &str = "''";

/// What the child sees for a variable planned without a value, e.g. `OLD_APP_NAME` on a
/// map-only route. Scripts test for it with `[ "$OLD_APP_NAME" != null ]`.
pub const NULL_ENV_VALUE: &str = "null";

/// Locations of the external platform scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPaths {
    pub login: PathBuf,
    pub deploy: PathBuf,
    pub route: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    Login,
    Deploy,
    Route { target: String },
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Login => f.write_str("login"),
            StepKind::Deploy => f.write_str("deploy"),
            StepKind::Route { target } => write!(f, "route {}", target),
        }
    }
}

/// One external-process invocation.
///
/// A `None` environment value reaches the child as [`NULL_ENV_VALUE`], overriding any
/// value inherited from the operator's shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub kind: StepKind,
    pub script_path: PathBuf,
    pub environment: BTreeMap<String, Option<String>>,
}

impl StepSpec {
    fn new(kind: StepKind, script_path: PathBuf) -> Self {
        Self {
            kind,
            script_path,
            environment: BTreeMap::new(),
        }
    }

    fn with_env(mut self, key: &str, value: Option<String>) -> Self {
        self.environment.insert(key.to_string(), value);
        self
    }

    /// Value planned for `key`: `None` if not planned, `Some(None)` if planned as unset.
    pub fn env(&self, key: &str) -> Option<Option<&str>> {
        self.environment.get(key).map(Option::as_deref)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    pub summary: Vec<SummaryLine>,
    pub steps: Vec<StepSpec>,
}

/// Build the summary and steps for the resolved action.
pub fn plan(params: &ResolvedParameters, scripts: &ScriptPaths) -> Result<ActionPlan, EzbxError> {
    match params.action {
        Action::Deploy => plan_deploy(params, scripts),
        Action::Route => plan_route(params, scripts),
    }
}

/// Only `y` or `yes`, in any letter case, confirms a run.
pub fn is_confirmed(answer: &str) -> bool {
    let answer = answer.to_lowercase();
    answer == "y" || answer == "yes"
}

/// `USE_SSO` is only exported when the profile sets `sso`.
fn login_step(profile: &ConfigProfile, scripts: &ScriptPaths) -> StepSpec {
    let step = StepSpec::new(StepKind::Login, scripts.login.clone())
        .with_env("API", Some(profile.api_endpoint.clone()))
        .with_env("ORGANIZATION", Some(profile.org_name.clone()))
        .with_env("SPACE", Some(profile.space_name.clone()));
    match profile.sso {
        Some(sso) => step.with_env("USE_SSO", Some(sso.to_string())),
        None => step,
    }
}

fn sso_summary(profile: &ConfigProfile) -> String {
    profile
        .sso
        .map_or_else(|| "-".to_string(), |sso| sso.to_string())
}

fn plan_deploy(params: &ResolvedParameters, scripts: &ScriptPaths) -> Result<ActionPlan, EzbxError> {
    let profile = &params.profile;
    let build_directory = params
        .build_directory
        .clone()
        .ok_or(EzbxError::MissingParameter("build directory"))?;
    let build_command = params
        .build_command
        .clone()
        .ok_or(EzbxError::MissingParameter("build command"))?;

    let summary = vec![
        SummaryLine::new("ACTION", params.action.as_str()),
        SummaryLine::new("APP_NAME", params.app_name.as_str()),
        SummaryLine::new("API", profile.api_endpoint.as_str()),
        SummaryLine::new("ORG", profile.org_name.as_str()),
        SummaryLine::new("SPACE", profile.space_name.as_str()),
        SummaryLine::new("NODE_ENV", profile.environment.as_str()),
        SummaryLine::new("MANIFEST", profile.manifest_path.as_str()),
        SummaryLine::new("USE_SSO", sso_summary(profile)),
        SummaryLine::new("BUILD_DIR", build_directory.as_str()),
        SummaryLine::new("BUILD_CMD", build_command.as_str()),
    ];

    let deploy = StepSpec::new(StepKind::Deploy, scripts.deploy.clone())
        .with_env("APP_NAME", Some(params.app_name.clone()))
        .with_env("BUILD_CMD", Some(build_command))
        .with_env("BUILD_DIR", Some(build_directory))
        .with_env("ENV", Some(profile.environment.clone()))
        .with_env("MANIFEST", Some(profile.manifest_path.clone()));

    Ok(ActionPlan {
        summary,
        steps: vec![login_step(profile, scripts), deploy],
    })
}

fn plan_route(params: &ResolvedParameters, scripts: &ScriptPaths) -> Result<ActionPlan, EzbxError> {
    let profile = &params.profile;
    let routes = profile.routes();
    if routes.is_empty() {
        return Err(EzbxError::ProfileInvalid {
            profile: params.profile_key.clone(),
            message: "route action requires at least one route entry".to_string(),
        });
    }

    let targets: Vec<String> = routes.iter().map(|r| r.display_value()).collect();
    let summary = vec![
        SummaryLine::new("ACTION", params.action.as_str()),
        SummaryLine::new("MAP", params.app_name.as_str()),
        SummaryLine::new("UNMAP", params.old_app_name.as_deref().unwrap_or("-")),
        SummaryLine::new("API", profile.api_endpoint.as_str()),
        SummaryLine::new("ORG", profile.org_name.as_str()),
        SummaryLine::new("SPACE", profile.space_name.as_str()),
        SummaryLine::new("NODE_ENV", profile.environment.as_str()),
        SummaryLine::new("ROUTES", targets.join(",")),
        SummaryLine::new("USE_SSO", sso_summary(profile)),
    ];

    let mut steps = Vec::with_capacity(routes.len() + 1);
    steps.push(login_step(profile, scripts));
    for (route, target) in routes.iter().zip(targets) {
        let host_name = route
            .host_name
            .clone()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| EMPTY_HOSTNAME.to_string());
        steps.push(
            StepSpec::new(StepKind::Route { target }, scripts.route.clone())
                .with_env("APP_NAME", Some(params.app_name.clone()))
                .with_env("OLD_APP_NAME", params.old_app_name.clone())
                .with_env("DOMAIN", Some(route.domain.clone()))
                .with_env("HOSTNAME", Some(host_name)),
        );
    }

    Ok(ActionPlan { summary, steps })
}
