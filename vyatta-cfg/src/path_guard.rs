use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Fail when `output` names one of the input files.
pub fn ensure_output_not_input(output: &Path, inputs: &[&Path]) -> Result<()> {
    let target = comparable(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    if let Some(input) = inputs
        .iter()
        .find(|input| comparable(input).is_ok_and(|resolved| resolved == target))
    {
        bail!(
            "refusing to overwrite input file: output {} matches {}",
            output.display(),
            input.display()
        );
    }
    Ok(())
}

fn comparable(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    // Not on disk yet, so symlinks and `..` stay unresolved.
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir().context("current_dir")?.join(path))
    }
}
