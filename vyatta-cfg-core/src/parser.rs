use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::classify::{classify, LineKind};
use crate::tree::{ConfigMap, ConfigNode, ConfigTree, NodeKind};

/// Errors that can occur while parsing configuration text into a [`ConfigTree`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// A non-blank line matched none of the grammar rules.
    #[error("line {line}: unrecognized configuration syntax: {text:?}")]
    MalformedLine { line: usize, text: String },
    /// A block was closed without being opened, or left open at end of input.
    #[error("line {line}: unbalanced block: {reason}")]
    UnbalancedBlock { line: usize, reason: String },
    /// A key was used both as a block and as a value at the same level.
    #[error("line {line}: '{key}' already holds a {existing}, cannot add a {found}")]
    ConflictingKind {
        line: usize,
        key: String,
        existing: NodeKind,
        found: NodeKind,
    },
    /// Failed to read input file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

/// What to do with lines that match no grammar rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Fail with [`ParseError::MalformedLine`].
    #[default]
    Reject,
    /// Log and ignore the line.
    Skip,
}

/// What to do with whole-line `/* ... */` comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentPolicy {
    /// Drop comment lines.
    #[default]
    Strip,
    /// Handle comment lines like any other unrecognized line.
    Reject,
}

/// Configures parser strictness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub malformed: MalformedPolicy,
    pub comments: CommentPolicy,
}

impl ParseOptions {
    /// Options that skip unrecognized lines instead of failing.
    pub fn lenient() -> Self {
        Self {
            malformed: MalformedPolicy::Skip,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Single,
    Double,
}

/// An open block. Its map is detached from the parent while open and written
/// back in place when the block closes.
#[derive(Debug)]
struct Frame {
    key: String,
    map: ConfigMap,
    kind: FrameKind,
    line: usize,
}

#[derive(Debug, Default)]
struct Builder {
    root: ConfigMap,
    open: Vec<Frame>,
}

impl Builder {
    fn top(&mut self) -> &mut ConfigMap {
        match self.open.last_mut() {
            Some(frame) => &mut frame.map,
            None => &mut self.root,
        }
    }

    fn open_block(&mut self, key: &str, kind: FrameKind, line: usize) -> Result<(), ParseError> {
        let slot = self
            .top()
            .entry(key.to_string())
            .or_insert_with(ConfigNode::map);
        let map = match slot {
            ConfigNode::Map(existing) => {
                if !existing.is_empty() {
                    debug!(line, key, "merging repeated block");
                }
                std::mem::take(existing)
            }
            other => {
                return Err(ParseError::ConflictingKind {
                    line,
                    key: key.to_string(),
                    existing: other.kind(),
                    found: NodeKind::Map,
                })
            }
        };
        self.open.push(Frame {
            key: key.to_string(),
            map,
            kind,
            line,
        });
        Ok(())
    }

    fn close_block(&mut self, line: usize) -> Result<(), ParseError> {
        let kind = self.pop_frame(line)?;
        if kind == FrameKind::Double {
            self.pop_frame(line)?;
        }
        Ok(())
    }

    fn pop_frame(&mut self, line: usize) -> Result<FrameKind, ParseError> {
        let frame = self
            .open
            .pop()
            .ok_or_else(|| ParseError::UnbalancedBlock {
                line,
                reason: "closing brace without open block".to_string(),
            })?;
        let kind = frame.kind;
        self.top().insert(frame.key, ConfigNode::Map(frame.map));
        Ok(kind)
    }

    fn add_value(&mut self, key: &str, value: &str, line: usize) -> Result<(), ParseError> {
        let top = self.top();
        match top.get_mut(key) {
            None => {
                top.insert(key.to_string(), ConfigNode::scalar(value));
            }
            Some(ConfigNode::Scalar(old)) => {
                let first = std::mem::take(old);
                top.insert(key.to_string(), ConfigNode::List(vec![first, value.to_string()]));
            }
            Some(ConfigNode::List(values)) => values.push(value.to_string()),
            Some(ConfigNode::Map(_)) => {
                return Err(ParseError::ConflictingKind {
                    line,
                    key: key.to_string(),
                    existing: NodeKind::Map,
                    found: NodeKind::Scalar,
                })
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<ConfigTree, ParseError> {
        if let Some(frame) = self.open.pop() {
            return Err(ParseError::UnbalancedBlock {
                line: frame.line,
                reason: format!("block '{}' is never closed", frame.key),
            });
        }
        Ok(self.root)
    }
}

/// Parse configuration text into a [`ConfigTree`] with default options.
pub fn parse(text: &str) -> Result<ConfigTree, ParseError> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse configuration text into a [`ConfigTree`].
pub fn parse_with_options(text: &str, opts: &ParseOptions) -> Result<ConfigTree, ParseError> {
    let mut builder = Builder::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let kind = match classify(raw) {
            Some(LineKind::Comment) if opts.comments == CommentPolicy::Reject => None,
            other => other,
        };

        match kind {
            Some(LineKind::Blank) | Some(LineKind::Comment) => {}
            Some(LineKind::BlockOpen1(key)) => builder.open_block(key, FrameKind::Single, line)?,
            Some(LineKind::BlockOpen2(key, name)) => {
                builder.open_block(key, FrameKind::Double, line)?;
                builder.open_block(name, FrameKind::Double, line)?;
            }
            Some(LineKind::BlockClose) => builder.close_block(line)?,
            Some(LineKind::KeyValue(key, value)) => builder.add_value(key, value, line)?,
            Some(LineKind::Flag(key)) => builder.add_value(key, "", line)?,
            None => match opts.malformed {
                MalformedPolicy::Reject => {
                    return Err(ParseError::MalformedLine {
                        line,
                        text: raw.trim().to_string(),
                    })
                }
                MalformedPolicy::Skip => {
                    warn!(line, text = raw.trim(), "skipping unrecognized line");
                }
            },
        }
    }

    builder.finish()
}

/// Parse a configuration file into a [`ConfigTree`] with default options.
pub fn parse_file(path: &Path) -> Result<ConfigTree, ParseError> {
    parse_file_with_options(path, &ParseOptions::default())
}

/// Parse a configuration file into a [`ConfigTree`].
pub fn parse_file_with_options(path: &Path, opts: &ParseOptions) -> Result<ConfigTree, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_with_options(&text, opts)
}
