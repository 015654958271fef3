use anyhow::{Context, Result};
use clap::Parser;
use vyatta_cfg::input::load_tree;
use vyatta_cfg::inspect::render_tree;
use vyatta_cfg::logging;
use vyatta_cfg::script::render_set_commands;
use vyatta_cfg::settings::{resolve_settings, Settings};
use vyatta_cfg_core::{
    format_tree_json, walk, walk_tree, write, ConfigNode, MalformedPolicy, ParseOptions, Path,
};

mod cli;
mod diff_cmd;
mod path_guard;

use cli::{Cli, Command, CommandsArgs, InspectArgs, OutputFormat, ParseArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = resolve_settings(cli.settings.as_deref())?;

    match cli.command {
        Command::Parse(args) => run_parse(args, &settings),
        Command::Commands(args) => run_commands(args, &settings),
        Command::Diff(args) => diff_cmd::run_diff(args, &settings),
        Command::Inspect(args) => run_inspect(args, &settings),
    }
}

/// Parser options from settings, with `--lenient` forcing malformed lines to be skipped.
pub(crate) fn parse_options(settings: &Settings, lenient: bool) -> ParseOptions {
    let mut opts = settings.parser.parse_options();
    if lenient {
        opts.malformed = MalformedPolicy::Skip;
    }
    opts
}

fn run_parse(args: ParseArgs, settings: &Settings) -> Result<()> {
    let tree = load_tree(&args.file, &parse_options(settings, args.lenient))?;

    match args.format {
        OutputFormat::Text => print!("{}", write(&tree)?),
        OutputFormat::Json => println!("{}", format_tree_json(&tree)),
    }
    Ok(())
}

fn run_commands(args: CommandsArgs, settings: &Settings) -> Result<()> {
    let tree = load_tree(&args.file, &parse_options(settings, args.lenient))?;

    let commands = match &args.prefix {
        Some(prefix) => {
            let keys: Vec<&str> = prefix.split_whitespace().collect();
            let root = ConfigNode::Map(tree);
            let node = root
                .get_path(&keys)
                .with_context(|| format!("path '{prefix}' not found"))?;
            render_set_commands(walk(node, Path::from_keys(keys.iter().copied())))
        }
        None => render_set_commands(walk_tree(&tree)),
    };

    for command in commands {
        println!("{command}");
    }
    Ok(())
}

fn run_inspect(args: InspectArgs, settings: &Settings) -> Result<()> {
    let tree = load_tree(&args.file, &parse_options(settings, args.lenient))?;

    match args.section {
        Some(section) => {
            let keys: Vec<&str> = section.split_whitespace().collect();
            let root = ConfigNode::Map(tree);
            match root.get_path(&keys) {
                Some(ConfigNode::Map(map)) => print!("{}", render_tree(map, args.depth)),
                Some(leaf) => println!("{section} = [{}]", leaf.values().join(", ")),
                None => anyhow::bail!("section '{section}' not found"),
            }
        }
        None => print!("{}", render_tree(&tree, args.depth)),
    }
    Ok(())
}
