//! CLI parse: clap types for ezbx. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// ezbx - interactive deploy and route orchestration
#[derive(Debug, Parser)]
#[command(name = "ezbx")]
#[command(version)]
#[command(about = "Interactively deploy or route an app using a profile file")]
pub struct Cli {
    /// Path to the profile file (JSON, or TOML with a .toml extension)
    pub config: Option<PathBuf>,

    /// Settings file (overrides the global settings file)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Directory containing login.sh, deploy.sh and route.sh
    #[arg(long)]
    pub scripts_dir: Option<PathBuf>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging (debug level)
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
