use crate::diff::result::{Changeset, DiffReason};

/// Format a changeset as plain text, deletions first.
pub fn format_text(changes: &Changeset) -> String {
    let mut lines = Vec::with_capacity(changes.deletes.len() + changes.sets.len());
    for entry in &changes.deletes {
        lines.push(format!("- {}", entry.path));
    }
    for entry in &changes.sets {
        lines.push(format!("+ {}", entry.path));
    }
    lines.join("\n")
}

/// Format a simple summary of changeset counts.
pub fn format_summary(changes: &Changeset) -> String {
    let replaced = changes
        .deletes
        .iter()
        .chain(&changes.sets)
        .filter(|entry| entry.reason == DiffReason::ShapeMismatch)
        .count();

    format!(
        "deletes={} sets={} replaced={replaced}",
        changes.deletes.len(),
        changes.sets.len()
    )
}
