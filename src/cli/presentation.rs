//! CLI presentation: render plans, completions and errors for the console.

use crate::error::EzbxError;
use crate::plan::SummaryLine;
use crate::workflow::Completion;
use comfy_table::presets::NOTHING;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Confirmation summary as an aligned two-column block, yellow when `color` is set.
pub fn format_summary(lines: &[SummaryLine], color: bool) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    for line in lines {
        table.add_row(vec![line.label.to_string(), line.value.clone()]);
    }
    let rendered = table.to_string();
    if color {
        format!("{}", rendered.yellow())
    } else {
        rendered
    }
}

/// `<app> <action> completed with code <code> in <seconds> seconds`
pub fn format_completion(completion: &Completion, color: bool) -> String {
    let line = format!(
        "{} {} completed with code {} in {} seconds",
        completion.app_name, completion.action, completion.exit_code, completion.elapsed_seconds
    );
    if color {
        format!("{}", line.green())
    } else {
        line
    }
}

pub fn format_error(error: &EzbxError, color: bool) -> String {
    let mut message = super::output::map_error(error);
    if let Some(note) = super::output::partial_run_note(error) {
        message.push('\n');
        message.push_str(note);
    }
    if color {
        format!("{}", message.magenta())
    } else {
        message
    }
}
