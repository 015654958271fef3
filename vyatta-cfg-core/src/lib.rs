//! Parsing and diffing for EdgeOS/VyOS configuration trees.
//!
//! Configuration text is classified line by line, built into a
//! [`ConfigTree`] by an explicit stack machine, and compared against another
//! tree to produce the ordered [`Path`]s a router needs to reach the target
//! state.

pub mod classify;
pub mod diff;
pub mod format;
pub mod parser;
pub mod path;
pub mod tree;
pub mod walk;
pub mod writer;

pub use classify::{classify, LineKind};
pub use diff::{
    changeset, diff, diff_entries, diff_trees, diff_with_options, Changeset, DiffEntry,
    DiffMode, DiffOptions, DiffReason,
};
pub use format::{format_changeset_json, format_summary, format_text, format_tree_json};
pub use parser::{
    parse, parse_file, parse_file_with_options, parse_with_options, CommentPolicy,
    MalformedPolicy, ParseError, ParseOptions,
};
pub use path::{Path, Segment};
pub use tree::{ConfigMap, ConfigNode, ConfigTree, NodeKind};
pub use walk::{walk, walk_tree, Walk};
pub use writer::{write, write_file, WriteError};
