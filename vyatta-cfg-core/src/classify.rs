//! Line classification for the configuration grammar.
//!
//! Rules overlap, so the order in which they are tried matters: a single-key
//! block opener, then a double-key opener, then `key value`, then a bare flag.

use std::sync::LazyLock;

use regex::Regex;

/// The kind of a single trimmed configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `key {`
    BlockOpen1(&'a str),
    /// `key name {`, a named instance such as `ethernet eth0 {`.
    BlockOpen2(&'a str, &'a str),
    /// `}`
    BlockClose,
    /// `key value`, with one layer of enclosing quotes removed from the value.
    KeyValue(&'a str, &'a str),
    /// `key` on its own.
    Flag(&'a str),
    /// `/* ... */` on a line of its own.
    Comment,
    /// Empty or whitespace-only line.
    Blank,
}

struct Grammar {
    block_open1: Regex,
    block_open2: Regex,
    key_value: Regex,
    flag: Regex,
    comment: Regex,
    instance: Regex,
}

static GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| Grammar {
    block_open1: compile(r"^([\w\-]+) +\{$"),
    block_open2: compile(r#"^([\w\-]+) +([\w\-"./@:=+]+) +\{$"#),
    key_value: compile(r"^([\w\-]+) +(.*)$"),
    flag: compile(r"^([\w\-]+)$"),
    comment: compile(r"^/\*.*\*/$"),
    instance: compile(r#"^[\w\-"./@:=+]+$"#),
});

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("invalid built-in grammar rule {pattern:?}: {err}"),
    }
}

/// Classify one line. Surrounding whitespace is ignored.
///
/// Returns `None` when a non-blank line matches none of the grammar rules.
pub fn classify(line: &str) -> Option<LineKind<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return Some(LineKind::Blank);
    }
    if line == "}" {
        return Some(LineKind::BlockClose);
    }

    let grammar = &*GRAMMAR;
    if grammar.comment.is_match(line) {
        return Some(LineKind::Comment);
    }
    if let Some(caps) = grammar.block_open1.captures(line) {
        return Some(LineKind::BlockOpen1(caps.get(1)?.as_str()));
    }
    if let Some(caps) = grammar.block_open2.captures(line) {
        return Some(LineKind::BlockOpen2(
            caps.get(1)?.as_str(),
            caps.get(2)?.as_str(),
        ));
    }
    if let Some(caps) = grammar.key_value.captures(line) {
        let value = strip_quotes(caps.get(2)?.as_str());
        return Some(LineKind::KeyValue(caps.get(1)?.as_str(), value));
    }
    if let Some(caps) = grammar.flag.captures(line) {
        return Some(LineKind::Flag(caps.get(1)?.as_str()));
    }
    None
}

/// True when `key` can be written as a bare identifier (`[\w-]+`).
pub fn is_identifier(key: &str) -> bool {
    GRAMMAR.flag.is_match(key)
}

/// True when `key` can appear as the second token of a double-key block.
pub fn is_instance_name(key: &str) -> bool {
    GRAMMAR.instance.is_match(key)
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}
