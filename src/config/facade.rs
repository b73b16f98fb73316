//! Settings loading facade.

use super::merge::merge_policy;
use super::sources::{global_file, settings_file};
use super::EzbxConfig;
use crate::error::EzbxError;
use config::Environment;
use std::path::Path;

/// Loads [`EzbxConfig`] from layered sources.
///
/// Precedence (lowest to highest): built-in defaults, global settings file, explicit
/// settings file, `EZBX_*` environment variables (`__` separates nesting, e.g.
/// `EZBX_SCRIPTS__DIR`).
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(settings_path: Option<&Path>) -> Result<EzbxConfig, EzbxError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = settings_path {
            builder = settings_file::add_to_builder(builder, path)?;
        }
        builder = builder.add_source(
            Environment::with_prefix("EZBX")
                .prefix_separator("_")
                .separator("__"),
        );

        let config: EzbxConfig = builder.build()?.try_deserialize()?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Load only the given settings file on top of defaults, ignoring the global file
    /// and the environment.
    pub fn load_from_file(path: &Path) -> Result<EzbxConfig, EzbxError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = settings_file::add_to_builder(builder, path)?;
        let config: EzbxConfig = builder.build()?.try_deserialize()?;
        config.ensure_valid()?;
        Ok(config)
    }
}
