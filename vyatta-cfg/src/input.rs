use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;
use vyatta_cfg_core::{parse_with_options, ConfigTree, ParseError, ParseOptions};

/// Errors returned when loading a configuration tree from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Config { path: String, source: ParseError },
    #[error("failed to parse JSON tree {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Load a configuration tree.
///
/// Files ending in `.json` hold a tree in the same shape `parse --format json`
/// prints; anything else is parsed as configuration text.
pub fn load_tree(path: &Path, opts: &ParseOptions) -> Result<ConfigTree, LoadError> {
    let path_str = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path_str.clone(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let tree = if is_json {
        serde_json::from_str(&raw).map_err(|source| LoadError::Json {
            path: path_str.clone(),
            source,
        })?
    } else {
        parse_with_options(&raw, opts).map_err(|source| LoadError::Config {
            path: path_str.clone(),
            source,
        })?
    };

    debug!(path = %path_str, json = is_json, top_level = tree.len(), "loaded configuration");
    Ok(tree)
}
