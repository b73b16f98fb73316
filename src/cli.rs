//! CLI domain: parse, output, and presentation only.
//! No domain orchestration; the binary wires these to [`crate::workflow::Workflow`].

mod output;
mod parse;
mod presentation;

pub use output::{map_error, partial_run_note};
pub use parse::Cli;
pub use presentation::{format_completion, format_error, format_summary};
