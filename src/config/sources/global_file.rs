//! Global settings file source: $XDG_CONFIG_HOME/ezbx/config.toml (platform config dir).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to the global settings file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ezbx").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global settings file to the builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_config_path() {
        if path.exists() {
            debug!(config_path = %path.display(), "Using global settings file");
            builder = builder.add_source(File::from(path).required(false));
        } else {
            debug!(config_path = %path.display(), "No global settings file");
        }
    }
    Ok(builder)
}
