//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::EzbxError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &EzbxError) -> String {
    match e {
        EzbxError::Launch { source, .. } => {
            format!("{} ({})", e, source.kind())
        }
        _ => e.to_string(),
    }
}

/// Hint appended to failures that happened after some steps already ran.
pub fn partial_run_note(e: &EzbxError) -> Option<&'static str> {
    match e {
        EzbxError::Shell { .. } | EzbxError::Launch { .. } => {
            Some("Steps completed before the failure were not rolled back.")
        }
        _ => None,
    }
}
