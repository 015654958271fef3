use crate::diff::result::Changeset;
use crate::tree::ConfigTree;

/// Format a parsed tree as pretty JSON.
pub fn format_tree_json(tree: &ConfigTree) -> String {
    serde_json::to_string_pretty(tree).unwrap_or_else(|_| "{}".to_string())
}

/// Format a changeset as pretty JSON.
pub fn format_changeset_json(changes: &Changeset) -> String {
    serde_json::to_string_pretty(changes)
        .unwrap_or_else(|_| r#"{"deletes":[],"sets":[]}"#.to_string())
}
