use std::fs;
use std::path::Path as FsPath;

use thiserror::Error;

use crate::classify::{is_identifier, is_instance_name};
use crate::path::Path;
use crate::tree::{ConfigMap, ConfigNode, ConfigTree};

const INDENT: &str = "    ";

/// Errors that can occur while writing configuration text from a tree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The tree holds a key the configuration grammar cannot express.
    #[error("cannot write key at '{path}': {reason}")]
    UnrepresentableKey { path: String, reason: String },
    /// Failed to write output file.
    #[error("failed to write configuration file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a tree as configuration text.
///
/// Keys that are not plain identifiers (addresses, quoted names) are written
/// as the second token of a `parent name {` block. Reparsing the output yields
/// an equal tree with the same key order.
pub fn write(tree: &ConfigTree) -> Result<String, WriteError> {
    let mut out = String::new();
    write_entries(tree.iter(), &Path::new(), 0, &mut out)?;
    Ok(out)
}

/// Render a tree and write it to `path`.
pub fn write_file(tree: &ConfigTree, path: &FsPath) -> Result<(), WriteError> {
    let text = write(tree)?;
    fs::write(path, text)?;
    Ok(())
}

fn write_entries<'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a ConfigNode)>,
    path: &Path,
    depth: usize,
    out: &mut String,
) -> Result<(), WriteError> {
    for (key, node) in entries {
        let child_path = path.child(key);
        if !is_identifier(key) {
            return Err(unrepresentable(&child_path, "not an identifier"));
        }
        match node {
            ConfigNode::Map(child) => write_block(key, child, &child_path, depth, out)?,
            leaf => {
                for value in leaf.values() {
                    push_value(key, value, depth, out);
                }
            }
        }
    }
    Ok(())
}

fn write_block(
    key: &str,
    map: &ConfigMap,
    path: &Path,
    depth: usize,
    out: &mut String,
) -> Result<(), WriteError> {
    if map.is_empty() {
        push_line(depth, &format!("{key} {{"), out);
        push_line(depth, "}", out);
        return Ok(());
    }

    // Consecutive identifier keys share one `key {` block; anything else is
    // written as a named instance. Repeated blocks merge when parsed again.
    let mut run = Vec::new();
    for (name, node) in map {
        if is_identifier(name) {
            run.push((name, node));
            continue;
        }
        flush_run(key, &mut run, path, depth, out)?;

        let named_path = path.child(name);
        let ConfigNode::Map(body) = node else {
            return Err(unrepresentable(&named_path, "value under a non-identifier key"));
        };
        if !is_instance_name(name) {
            return Err(unrepresentable(&named_path, "not a valid instance name"));
        }
        push_line(depth, &format!("{key} {name} {{"), out);
        write_entries(body.iter(), &named_path, depth + 1, out)?;
        push_line(depth, "}", out);
    }
    flush_run(key, &mut run, path, depth, out)
}

fn flush_run<'a>(
    key: &str,
    run: &mut Vec<(&'a String, &'a ConfigNode)>,
    path: &Path,
    depth: usize,
    out: &mut String,
) -> Result<(), WriteError> {
    if run.is_empty() {
        return Ok(());
    }
    push_line(depth, &format!("{key} {{"), out);
    write_entries(run.drain(..), path, depth + 1, out)?;
    push_line(depth, "}", out);
    Ok(())
}

fn push_value(key: &str, value: &str, depth: usize, out: &mut String) {
    if value.is_empty() {
        push_line(depth, key, out);
    } else if needs_quotes(value) {
        push_line(depth, &format!("{key} \"{value}\""), out);
    } else {
        push_line(depth, &format!("{key} {value}"), out);
    }
}

fn needs_quotes(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '{' | '}'))
}

fn push_line(depth: usize, text: &str, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

fn unrepresentable(path: &Path, reason: &str) -> WriteError {
    WriteError::UnrepresentableKey {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
