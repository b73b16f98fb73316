//! ezbx CLI Binary
//!
//! Command-line entry point: loads settings and the profile file, then runs the
//! interactive workflow on a single-threaded tokio runtime.

use clap::Parser;
use ezbx::cli::{format_completion, format_error, format_summary, Cli};
use ezbx::config::{ConfigLoader, EzbxConfig};
use ezbx::logging::{init_logging, LoggingConfig};
use ezbx::profile::ProfileSet;
use ezbx::prompt::DialoguerPrompter;
use ezbx::runner::ShellRunner;
use ezbx::workflow::{Completion, Workflow};
use ezbx::EzbxError;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();

    match run(&cli, color) {
        Ok(completion) => {
            info!(exit_code = completion.exit_code, "Run completed");
            println!("{}", format_completion(&completion, color));
        }
        Err(e) => {
            if e.is_user_abort() {
                info!("Run aborted by operator");
            } else {
                error!("Run failed: {}", e);
            }
            eprintln!("{}", format_error(&e, color));
            process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli, color: bool) -> Result<Completion, EzbxError> {
    let config_path = cli.config.clone().ok_or_else(|| {
        EzbxError::Argument(
            "You must provide the path to your config file, for example 'ezbx bx-config.json'"
                .to_string(),
        )
    })?;

    let mut settings = ConfigLoader::load(cli.settings.as_deref())?;
    apply_cli_overrides(cli, &mut settings);

    // Logging failures are reported but never block a deploy.
    if let Err(e) = init_logging(Some(&settings.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    info!(config = %config_path.display(), "ezbx starting");

    let profiles = ProfileSet::load(&config_path)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| EzbxError::ConfigError(format!("Failed to create async runtime: {}", e)))?;

    let workflow = Workflow::new(
        DialoguerPrompter,
        ShellRunner::new(settings.scripts.shell.clone()),
        settings.scripts.paths(),
        settings.program.info(),
    );

    runtime.block_on(workflow.run(&profiles, |prepared| {
        println!("{}", format_summary(&prepared.plan.summary, color));
    }))
}

/// Fold CLI flags over the loaded settings. Flags win over settings files.
fn apply_cli_overrides(cli: &Cli, settings: &mut EzbxConfig) {
    if let Some(ref dir) = cli.scripts_dir {
        settings.scripts.dir = dir.clone();
    }
    apply_logging_overrides(cli, &mut settings.logging);
}

fn apply_logging_overrides(cli: &Cli, config: &mut LoggingConfig) {
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }
    if cli.no_color {
        config.color = false;
    }
}
