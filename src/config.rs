//! Configuration System
//!
//! Tool settings for ezbx: where the platform scripts live, which shell runs them, the
//! program identity used for app-name defaults, and logging. Settings are layered with the
//! `config` crate; see [`ConfigLoader`] for precedence.

use crate::error::EzbxError;
use crate::logging::LoggingConfig;
use crate::plan::ScriptPaths;
use crate::prompt::ProgramInfo;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EzbxConfig {
    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub program: ProgramConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// External platform scripts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// Directory the script names are resolved against
    #[serde(default = "default_scripts_dir")]
    pub dir: PathBuf,

    /// Shell used to launch each script
    #[serde(default = "default_shell")]
    pub shell: String,

    #[serde(default = "default_login_script")]
    pub login: String,

    #[serde(default = "default_deploy_script")]
    pub deploy: String,

    #[serde(default = "default_route_script")]
    pub route: String,
}

pub(crate) fn default_scripts_dir() -> PathBuf {
    PathBuf::from("./ezbx")
}

pub(crate) fn default_shell() -> String {
    "sh".to_string()
}

pub(crate) fn default_login_script() -> String {
    "login.sh".to_string()
}

pub(crate) fn default_deploy_script() -> String {
    "deploy.sh".to_string()
}

pub(crate) fn default_route_script() -> String {
    "route.sh".to_string()
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            dir: default_scripts_dir(),
            shell: default_shell(),
            login: default_login_script(),
            deploy: default_deploy_script(),
            route: default_route_script(),
        }
    }
}

impl ScriptsConfig {
    pub fn paths(&self) -> ScriptPaths {
        ScriptPaths {
            login: self.dir.join(&self.login),
            deploy: self.dir.join(&self.deploy),
            route: self.dir.join(&self.route),
        }
    }
}

/// Program identity feeding the app-name default (`<name>-<version>`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    #[serde(default = "default_program_name")]
    pub name: String,

    #[serde(default = "default_program_version")]
    pub version: String,
}

pub(crate) fn default_program_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

pub(crate) fn default_program_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            name: default_program_name(),
            version: default_program_version(),
        }
    }
}

impl ProgramConfig {
    pub fn info(&self) -> ProgramInfo {
        ProgramInfo {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }
}

impl EzbxConfig {
    /// Validate the settings, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.scripts.shell.trim().is_empty() {
            errors.push("scripts.shell cannot be empty".to_string());
        }
        for (name, value) in [
            ("scripts.login", &self.scripts.login),
            ("scripts.deploy", &self.scripts.deploy),
            ("scripts.route", &self.scripts.route),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{} cannot be empty", name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and convert the collected problems into one error.
    pub fn ensure_valid(&self) -> Result<(), EzbxError> {
        self.validate()
            .map_err(|errors| EzbxError::ConfigError(errors.join("; ")))
    }
}
