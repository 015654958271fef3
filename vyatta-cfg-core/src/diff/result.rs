use serde::Serialize;

use crate::path::Path;

/// Why a path was emitted by the differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffReason {
    /// The key exists only in the target.
    Missing,
    /// The target holds a leaf value the baseline lacks.
    ValueAdded,
    /// Baseline and target disagree on block vs. value; the branch is replaced.
    ShapeMismatch,
}

/// A single differ outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    pub path: Path,
    pub reason: DiffReason,
}

/// Both directions of a configuration change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Changeset {
    /// Branches and values present now but absent from the desired state.
    pub deletes: Vec<DiffEntry>,
    /// Leaf values the desired state adds or changes.
    pub sets: Vec<DiffEntry>,
}

impl Changeset {
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.sets.is_empty()
    }

    pub fn delete_paths(&self) -> impl Iterator<Item = &Path> {
        self.deletes.iter().map(|entry| &entry.path)
    }

    pub fn set_paths(&self) -> impl Iterator<Item = &Path> {
        self.sets.iter().map(|entry| &entry.path)
    }
}
