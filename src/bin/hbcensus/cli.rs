use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "hbcensus",
    about = "Backbone hydrogen-bond census for protein structures",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Survey hydrogen bonds and tabulate per-class means (PDB)
    #[command(visible_alias = "s")]
    Survey(SurveyArgs),

    /// Print the number of models in a PDB file
    #[command(visible_alias = "m")]
    Models(ModelsArgs),
}

/// Verbosity options shared by all commands.
#[derive(Args)]
pub struct LogOptions {
    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args)]
pub struct SurveyArgs {
    /// Input PDB file(s), each surveyed independently (stdin if omitted)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub selection: SelectionOptions,

    #[command(flatten)]
    pub criteria: CriteriaOptions,

    #[command(flatten)]
    pub log: LogOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// Summary table destination (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Summary table format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: TableFormat,

    /// Per-bond audit CSV with hydrogen coordinates
    #[arg(long, value_name = "FILE")]
    pub audit: Option<PathBuf>,

    /// Average the bonds of all inputs into one table
    #[arg(long)]
    pub pool: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Structure Selection")]
pub struct SelectionOptions {
    /// Model serial to read
    #[arg(long, value_name = "N", default_value = "1")]
    pub model: usize,

    /// Restrict to a single chain (all chains if omitted)
    #[arg(long, value_name = "C")]
    pub chain: Option<char>,

    /// Keep every alternate location instead of the first one
    #[arg(long)]
    pub all_alt_locs: bool,
}

/// Acceptance criteria; explicit flags override values from --config.
#[derive(Args)]
#[command(next_help_heading = "Acceptance Criteria")]
pub struct CriteriaOptions {
    /// Survey configuration (TOML file)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum donor–acceptor distance [default: 3.5]
    #[arg(long = "da-max", value_name = "Å")]
    pub donor_acceptor_max: Option<f64>,

    /// Maximum hydrogen–acceptor distance [default: 2.5]
    #[arg(long = "ha-max", value_name = "Å")]
    pub hydrogen_acceptor_max: Option<f64>,

    /// Minimum donor–hydrogen–acceptor angle [default: 90]
    #[arg(long = "dha-min", value_name = "DEG")]
    pub dha_min: Option<f64>,

    /// Minimum donor–acceptor–antecedent angle [default: 90]
    #[arg(long = "dab-min", value_name = "DEG")]
    pub dab_min: Option<f64>,

    /// Minimum hydrogen–acceptor–antecedent angle [default: 90]
    #[arg(long = "hab-min", value_name = "DEG")]
    pub hab_min: Option<f64>,

    /// Hydrogen paired with each donor [default: first]
    #[arg(long, value_name = "STRATEGY")]
    pub hydrogen: Option<HydrogenChoice>,

    /// Allow each donor and acceptor in at most one bond (shortest H···A first)
    #[arg(long)]
    pub exclusive: bool,
}

#[derive(Args)]
pub struct ModelsArgs {
    /// Input PDB file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub log: LogOptions,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum TableFormat {
    /// Fixed-width columns
    #[default]
    Text,
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON
    Json,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum HydrogenChoice {
    /// First hydrogen of the donor residue in file order
    #[default]
    First,
    /// Hydrogen of the donor residue closest to the donor
    Nearest,
}

pub fn parse() -> Cli {
    Cli::parse()
}
