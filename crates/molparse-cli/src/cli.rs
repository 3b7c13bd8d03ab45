use clap::{Args, Parser, Subcommand, ValueEnum};
use molparse::engine::config::FormatPreference;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The molparse developers",
    version,
    about = "molparse CLI - Inspect PDB and mmCIF structure files: atoms, residues, chains and secondary structure.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to parse several files at once.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse one or more structure files and print a summary of each.
    Inspect(InspectArgs),
    /// Parse a structure file and write its residue table as CSV.
    Residues(ResiduesArgs),
}

/// How `inspect` prints its summaries.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One human-readable block per file.
    #[default]
    Text,
    /// One CSV row per file.
    Csv,
}

/// Parse options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ParseArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Force the input format instead of detecting it ('auto', 'pdb' or 'cif').
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<FormatPreference>,

    /// Skip HELIX/SHEET and _struct_conf/_struct_sheet_range annotation.
    #[arg(long)]
    pub no_secondary_structure: bool,

    /// Ignore HETATM records (ligands, waters, modified residues).
    #[arg(long)]
    pub no_hetero: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S parse.max-logged-line-errors=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Structure files to parse (.pdb, .ent, .cif, .mmcif).
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Summary format, overriding `output.format` from the config file.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    #[command(flatten)]
    pub parse: ParseArgs,
}

/// Arguments for the `residues` subcommand.
#[derive(Args, Debug)]
pub struct ResiduesArgs {
    /// Structure file to parse.
    #[arg(required = true, value_name = "FILE")]
    pub input: PathBuf,

    /// Write the CSV table here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub parse: ParseArgs,
}
