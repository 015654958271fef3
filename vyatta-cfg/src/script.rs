//! Render changeset paths into router command lines.

use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use serde::Deserialize;
use vyatta_cfg_core::{Changeset, Path, Segment};

/// Command wrapper shipped with EdgeOS/VyOS for non-interactive sessions.
pub const CFG_CMD_WRAPPER: &str = "/opt/vyatta/sbin/vyatta-cfg-cmd-wrapper";

/// Output layout for generated command lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStyle {
    /// One `set`/`delete` line per change, as typed in configure mode.
    #[default]
    Plain,
    /// A `vbash` script driving the configuration command wrapper.
    Wrapper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Set,
    Delete,
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Set => f.write_str("set"),
            Verb::Delete => f.write_str("delete"),
        }
    }
}

/// Render one configure-mode command.
pub fn render_command(verb: Verb, path: &Path) -> String {
    format!("{verb} {path}")
}

/// All commands of a changeset, deletions first.
pub fn render_commands(changes: &Changeset) -> Vec<String> {
    changes
        .delete_paths()
        .map(|path| render_command(Verb::Delete, path))
        .chain(changes.set_paths().map(|path| render_command(Verb::Set, path)))
        .collect()
}

/// Set commands that rebuild every leaf yielded by `paths`.
pub fn render_set_commands<I>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = Path>,
{
    paths
        .into_iter()
        .map(|path| render_command(Verb::Set, &path))
        .collect()
}

/// Render a changeset as a complete script in the requested style.
pub fn render_script(changes: &Changeset, style: ScriptStyle, save: bool) -> String {
    let mut lines = Vec::new();
    match style {
        ScriptStyle::Plain => lines.extend(render_commands(changes)),
        ScriptStyle::Wrapper => {
            lines.push("#!/bin/vbash".to_string());
            lines.push(format!("W={CFG_CMD_WRAPPER}"));
            lines.push("$W begin".to_string());
            for path in changes.delete_paths() {
                lines.push(format!("$W {} {}", Verb::Delete, shell_path(path)));
            }
            for path in changes.set_paths() {
                lines.push(format!("$W {} {}", Verb::Set, shell_path(path)));
            }
            lines.push("$W commit".to_string());
            if save {
                lines.push("$W save".to_string());
            }
            lines.push("$W end".to_string());
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Path rendered for a POSIX shell: values single quoted so `$` and spaces
/// reach the wrapper untouched.
fn shell_path(path: &Path) -> String {
    path.segments()
        .iter()
        .map(|segment| match segment {
            Segment::Key(key) => key.clone(),
            Segment::Value(value) => format!("'{}'", value.replace('\'', r"'\''")),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
