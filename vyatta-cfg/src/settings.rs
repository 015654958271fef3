use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use vyatta_cfg_core::{CommentPolicy, MalformedPolicy, ParseOptions};

use crate::script::ScriptStyle;

/// Tool settings loaded from an optional TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub parser: ParserSettings,
    pub diff: DiffSettings,
    pub script: ScriptSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserSettings {
    pub malformed: MalformedPolicy,
    pub comments: CommentPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSettings {
    /// Key paths never touched by generated changesets.
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptSettings {
    pub style: ScriptStyle,
    /// Emit `save` after `commit` in wrapper scripts.
    pub save: bool,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            style: ScriptStyle::Plain,
            save: true,
        }
    }
}

impl ParserSettings {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            malformed: self.malformed,
            comments: self.comments,
        }
    }
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_settings(&raw, path.display().to_string())
}

/// Load settings from `path`, or fall back to defaults when no file is given.
pub fn resolve_settings(path: Option<&Path>) -> Result<Settings, SettingsLoadError> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(Settings::default()),
    }
}

fn parse_settings(raw: &str, path: String) -> Result<Settings, SettingsLoadError> {
    toml::from_str(raw).map_err(|source| SettingsLoadError::Parse { path, source })
}
