//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("scripts.dir", "./ezbx")?
        .set_default("scripts.shell", "sh")?
        .set_default("scripts.login", "login.sh")?
        .set_default("scripts.deploy", "deploy.sh")?
        .set_default("scripts.route", "route.sh")?
        .set_default("program.name", env!("CARGO_PKG_NAME"))?
        .set_default("program.version", env!("CARGO_PKG_VERSION"))
}
