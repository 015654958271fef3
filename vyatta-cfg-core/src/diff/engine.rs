use std::collections::HashSet;

use tracing::debug;

use crate::diff::result::{Changeset, DiffEntry, DiffReason};
use crate::path::Path;
use crate::tree::{ConfigMap, ConfigNode, ConfigTree};
use crate::walk::walk;

/// How far the differ expands a branch that is missing from the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiffMode {
    /// Stop at the first missing key. Used for deletions, where removing a
    /// branch removes everything beneath it.
    Shallow,
    /// Expand a missing branch into one path per leaf value. Used for
    /// additions, where each leaf needs its own `set`.
    #[default]
    Deep,
}

/// Configures tree diff behavior.
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub mode: DiffMode,
    /// Space separated key paths (for example `system config-management`)
    /// whose subtrees are left out of the result.
    pub ignore_paths: Vec<String>,
}

/// Paths present in `target` but absent from or different in `baseline`.
pub fn diff(baseline: &ConfigNode, target: &ConfigNode, mode: DiffMode) -> Vec<Path> {
    let opts = DiffOptions {
        mode,
        ..DiffOptions::default()
    };
    diff_with_options(baseline, target, &opts)
}

/// Like [`diff`], with ignore paths.
pub fn diff_with_options(baseline: &ConfigNode, target: &ConfigNode, opts: &DiffOptions) -> Vec<Path> {
    diff_entries(baseline, target, opts)
        .into_iter()
        .map(|entry| entry.path)
        .collect()
}

/// Diff two nodes and keep the reason each path was emitted.
pub fn diff_entries(baseline: &ConfigNode, target: &ConfigNode, opts: &DiffOptions) -> Vec<DiffEntry> {
    let mut ctx = DiffContext::new(opts);
    let root = Path::new();
    match (baseline, target) {
        (ConfigNode::Map(bmap), ConfigNode::Map(tmap)) => {
            diff_map(Some(bmap), tmap, &root, &mut ctx)
        }
        (b, t) if b.is_leaf() && t.is_leaf() => {
            diff_leaf(b.values(), t.values(), &root, &mut ctx)
        }
        (b, ConfigNode::Map(tmap)) => {
            debug!(baseline = %b.kind(), "shape mismatch at root, replacing document");
            for (key, child) in tmap {
                let path = root.child(key);
                if !ctx.should_ignore(&path) {
                    ctx.add_branch(path, child, DiffReason::ShapeMismatch);
                }
            }
        }
        (b, leaf) => {
            debug!(baseline = %b.kind(), "shape mismatch at root, replacing value");
            for path in walk(leaf, root) {
                ctx.push(path, DiffReason::ShapeMismatch);
            }
        }
    }
    ctx.out
}

/// Diff two whole documents.
pub fn diff_trees(baseline: &ConfigTree, target: &ConfigTree, opts: &DiffOptions) -> Vec<DiffEntry> {
    let mut ctx = DiffContext::new(opts);
    diff_map(Some(baseline), target, &Path::new(), &mut ctx);
    ctx.out
}

/// Compute the deletes and sets that turn `current` into `desired`.
///
/// Deletes are a shallow diff with the trees swapped; sets are a deep diff.
/// The mode in `opts` is ignored.
pub fn changeset(current: &ConfigTree, desired: &ConfigTree, opts: &DiffOptions) -> Changeset {
    let shallow = DiffOptions {
        mode: DiffMode::Shallow,
        ..opts.clone()
    };
    let deep = DiffOptions {
        mode: DiffMode::Deep,
        ..opts.clone()
    };

    let changes = Changeset {
        deletes: diff_trees(desired, current, &shallow),
        sets: diff_trees(current, desired, &deep),
    };
    debug!(
        deletes = changes.deletes.len(),
        sets = changes.sets.len(),
        "computed changeset"
    );
    changes
}

struct DiffContext {
    mode: DiffMode,
    ignore: Vec<Vec<String>>,
    out: Vec<DiffEntry>,
}

impl DiffContext {
    fn new(opts: &DiffOptions) -> Self {
        let ignore = opts
            .ignore_paths
            .iter()
            .map(|raw| raw.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|keys| !keys.is_empty())
            .collect();
        Self {
            mode: opts.mode,
            ignore,
            out: Vec::new(),
        }
    }

    fn should_ignore(&self, path: &Path) -> bool {
        self.ignore.iter().any(|keys| path.starts_with_keys(keys))
    }

    /// True when some ignore path lies strictly beneath `path`.
    fn ignores_below(&self, path: &Path) -> bool {
        self.ignore.iter().any(|keys| {
            keys.len() > path.len()
                && path
                    .keys()
                    .zip(keys)
                    .all(|(have, want)| have == want.as_str())
        })
    }

    fn push(&mut self, path: Path, reason: DiffReason) {
        self.out.push(DiffEntry { path, reason });
    }

    fn add_branch(&mut self, path: Path, node: &ConfigNode, reason: DiffReason) {
        match self.mode {
            // An ignored subtree must survive the removal of its ancestors,
            // so descend and truncate at the siblings instead.
            DiffMode::Shallow => match node {
                ConfigNode::Map(map) if self.ignores_below(&path) => {
                    for (key, child) in map {
                        let child_path = path.child(key);
                        if !self.should_ignore(&child_path) {
                            self.add_branch(child_path, child, reason);
                        }
                    }
                }
                _ => self.push(path, reason),
            },
            DiffMode::Deep => {
                for leaf in walk(node, path) {
                    if !self.should_ignore(&leaf) {
                        self.push(leaf, reason);
                    }
                }
            }
        }
    }
}

fn diff_map(baseline: Option<&ConfigMap>, target: &ConfigMap, prefix: &Path, ctx: &mut DiffContext) {
    for (key, tvalue) in target {
        let path = prefix.child(key);
        if ctx.should_ignore(&path) {
            continue;
        }

        let Some(bvalue) = baseline.and_then(|map| map.get(key)) else {
            ctx.add_branch(path, tvalue, DiffReason::Missing);
            continue;
        };

        match (bvalue, tvalue) {
            (ConfigNode::Map(bmap), ConfigNode::Map(tmap)) => diff_map(Some(bmap), tmap, &path, ctx),
            (b, t) if b.is_leaf() && t.is_leaf() => diff_leaf(b.values(), t.values(), &path, ctx),
            (b, t) => {
                debug!(
                    path = %path,
                    baseline = %b.kind(),
                    target = %t.kind(),
                    "shape mismatch, replacing branch"
                );
                ctx.add_branch(path, tvalue, DiffReason::ShapeMismatch);
            }
        }
    }
}

fn diff_leaf(baseline: &[String], target: &[String], prefix: &Path, ctx: &mut DiffContext) {
    let known: HashSet<&str> = baseline.iter().map(String::as_str).collect();
    let mut emitted = HashSet::new();
    for value in target {
        if !known.contains(value.as_str()) && emitted.insert(value.as_str()) {
            ctx.push(prefix.with_value(value), DiffReason::ValueAdded);
        }
    }
}
