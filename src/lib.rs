//! ezbx: interactive deploy and route orchestration
//!
//! Reads a profile file, asks the operator for whatever the chosen profile leaves open,
//! shows a confirmation summary, and then runs the platform's login, deploy and route
//! scripts as child processes, one after another, stopping at the first failure.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod params;
pub mod pipeline;
pub mod plan;
pub mod profile;
pub mod prompt;
pub mod runner;
pub mod workflow;

pub use error::EzbxError;
