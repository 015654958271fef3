use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use vyatta_cfg::script::ScriptStyle;

#[derive(Parser, Debug)]
#[command(name = "vyatta-cfg")]
#[command(about = "Parse EdgeOS/VyOS configurations and compute set/delete changesets")]
pub struct Cli {
    /// Optional TOML settings file.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Parse one configuration and print it normalized or as JSON.
    Parse(ParseArgs),
    /// Print a `set` command for every value in one configuration.
    Commands(CommandsArgs),
    /// Compute the commands that turn the current configuration into the desired one.
    Diff(DiffArgs),
    /// Show an outline of one configuration.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Skip unrecognized lines instead of failing.
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Parser, Debug)]
pub struct CommandsArgs {
    pub file: PathBuf,
    /// Only print commands beneath this key path (for example "interfaces ethernet").
    #[arg(long)]
    pub prefix: Option<String>,
    /// Skip unrecognized lines instead of failing.
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Configuration currently on the router.
    pub current: PathBuf,
    /// Desired configuration (configuration text, or a `.json` tree).
    pub desired: PathBuf,
    /// Key path to leave untouched; may be repeated.
    #[arg(long)]
    pub ignore: Vec<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Only print change counts.
    #[arg(long)]
    pub summary: bool,
    /// Write the commands to a script file.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Script layout for --output. Defaults to the settings file, then plain.
    #[arg(long, value_enum)]
    pub style: Option<ScriptStyle>,
    /// Exit with an error when the configurations differ.
    #[arg(long)]
    pub fail_on_changes: bool,
    /// Skip unrecognized lines instead of failing.
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    /// Key path of the subtree to show (for example "firewall name").
    #[arg(long)]
    pub section: Option<String>,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
    /// Skip unrecognized lines instead of failing.
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
