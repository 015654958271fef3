//! Tree and changeset formatters.

pub mod json;
pub mod text;

pub use json::{format_changeset_json, format_tree_json};
pub use text::{format_summary, format_text};
