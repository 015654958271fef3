//! Flatten a subtree into fully qualified leaf paths.

use crate::path::Path;
use crate::tree::{ConfigMap, ConfigNode};

/// Lazy iterator over the leaf paths beneath a node.
///
/// Traversal uses an explicit stack, so nesting depth is unbounded. The
/// iterator is cheap to clone; a clone restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<Frame<'a>>,
}

#[derive(Debug, Clone)]
enum Frame<'a> {
    Entries {
        prefix: Path,
        iter: indexmap::map::Iter<'a, String, ConfigNode>,
    },
    Values {
        prefix: Path,
        iter: std::slice::Iter<'a, String>,
    },
}

/// Walk `node`, prefixing every produced path with `prefix`.
///
/// Map children extend the prefix with their key; leaf values terminate it
/// with a quoted value segment. Walking a bare leaf yields `prefix` plus each
/// of its values.
pub fn walk<'a>(node: &'a ConfigNode, prefix: Path) -> Walk<'a> {
    let frame = match node {
        ConfigNode::Map(map) => Frame::Entries {
            prefix,
            iter: map.iter(),
        },
        leaf => Frame::Values {
            prefix,
            iter: leaf.values().iter(),
        },
    };
    Walk { stack: vec![frame] }
}

/// Walk every leaf of a whole document.
pub fn walk_tree(tree: &ConfigMap) -> Walk<'_> {
    Walk {
        stack: vec![Frame::Entries {
            prefix: Path::new(),
            iter: tree.iter(),
        }],
    }
}

impl Iterator for Walk<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            let next = match self.stack.last_mut()? {
                Frame::Entries { prefix, iter } => match iter.next() {
                    Some((key, child)) => Some(Frame::from_child(prefix.child(key), child)),
                    None => None,
                },
                Frame::Values { prefix, iter } => match iter.next() {
                    Some(value) => return Some(prefix.with_value(value)),
                    None => None,
                },
            };

            match next {
                Some(frame) => self.stack.push(frame),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<'a> Frame<'a> {
    fn from_child(prefix: Path, child: &'a ConfigNode) -> Self {
        match child {
            ConfigNode::Map(map) => Frame::Entries {
                prefix,
                iter: map.iter(),
            },
            leaf => Frame::Values {
                prefix,
                iter: leaf.values().iter(),
            },
        }
    }
}
