use colored::Colorize;
use vyatta_cfg_core::{format_summary, Changeset};

use crate::script::render_commands;

/// Render changeset commands for terminal output.
pub fn render_changeset(changes: &Changeset) -> String {
    if changes.is_empty() {
        return "no changes".dimmed().to_string();
    }

    render_commands(changes)
        .into_iter()
        .map(|line| {
            if line.starts_with("delete ") {
                line.red().to_string()
            } else {
                line.green().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render summary counts for terminal output.
pub fn render_summary(changes: &Changeset) -> String {
    format_summary(changes).cyan().to_string()
}
