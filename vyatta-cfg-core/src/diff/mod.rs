//! One-directional configuration tree diffing.

pub mod engine;
pub mod result;

pub use engine::{
    changeset, diff, diff_entries, diff_trees, diff_with_options, DiffMode, DiffOptions,
};
pub use result::{Changeset, DiffEntry, DiffReason};
