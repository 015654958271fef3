use std::fs;

use anyhow::{bail, Context, Result};
use tracing::info;
use vyatta_cfg::input::load_tree;
use vyatta_cfg::report::{render_changeset, render_summary};
use vyatta_cfg::script::render_script;
use vyatta_cfg::settings::Settings;
use vyatta_cfg_core::{changeset, format_changeset_json, format_summary, DiffOptions};

use crate::cli::{DiffArgs, OutputFormat};
use crate::parse_options;
use crate::path_guard;

pub fn run_diff(args: DiffArgs, settings: &Settings) -> Result<()> {
    let opts = parse_options(settings, args.lenient);
    let current = load_tree(&args.current, &opts).context("failed to load current configuration")?;
    let desired = load_tree(&args.desired, &opts).context("failed to load desired configuration")?;

    let mut ignore_paths = settings.diff.ignore.clone();
    ignore_paths.extend(args.ignore);
    let diff_opts = DiffOptions {
        ignore_paths,
        ..DiffOptions::default()
    };

    let changes = changeset(&current, &desired, &diff_opts);
    info!(
        deletes = changes.deletes.len(),
        sets = changes.sets.len(),
        "changeset ready"
    );

    if let Some(out_path) = &args.output {
        path_guard::ensure_output_not_input(out_path, &[&args.current, &args.desired])?;
        let style = args.style.unwrap_or(settings.script.style);
        let script = render_script(&changes, style, settings.script.save);
        fs::write(out_path, script)
            .with_context(|| format!("failed to write script {}", out_path.display()))?;
        info!(path = %out_path.display(), ?style, "wrote script");
    }

    if args.summary {
        println!("{}", render_summary(&changes));
    } else {
        match args.format {
            OutputFormat::Text => println!("{}", render_changeset(&changes)),
            OutputFormat::Json => println!("{}", format_changeset_json(&changes)),
        }
    }

    if args.fail_on_changes && !changes.is_empty() {
        bail!("configurations differ: {}", format_summary(&changes));
    }
    Ok(())
}
