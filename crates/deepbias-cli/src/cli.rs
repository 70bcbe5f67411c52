use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "deepbias CLI - Validate machine-learned bias definitions and inspect the flat buffer layouts exchanged with inference engines.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every setup check of a bias definition that does not need the inference engine.
    Check(CheckArgs),
    /// Convert between flat buffer addresses and (channel, atom, dim) triples.
    Index(IndexArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Potential,
    Dipole,
    Polar,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the bias definition in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Total number of atoms in the simulated system.
    #[arg(short, long, required = true, value_name = "INT")]
    pub natoms: usize,

    /// Override the model kind from the config file.
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Host length unit (e.g. 'nm', 'A', 'Bohr').
    #[arg(long, default_value = "nm", value_name = "NAME")]
    pub length_unit: String,

    /// Host energy unit (e.g. 'kj/mol', 'kcal/mol', 'eV').
    #[arg(long, default_value = "kj/mol", value_name = "NAME")]
    pub energy_unit: String,

    /// Override the output unit conversion; negative values restore the default.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub unit_cvt: Option<f64>,

    /// Disable periodic boundary handling, overriding the config file.
    #[arg(long)]
    pub nopbc: bool,
}

/// Arguments for the `index` subcommand.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Number of atoms in the buffer.
    #[arg(long, required = true, value_name = "INT")]
    pub natom: usize,

    /// Number of output channels.
    #[arg(long, default_value_t = 1, value_name = "INT")]
    pub nout: usize,

    /// Number of spatial dimensions.
    #[arg(long, default_value_t = 3, value_name = "INT")]
    pub ndim: usize,

    /// Flat address to decompose.
    #[arg(long, value_name = "INT", conflicts_with = "at", required_unless_present = "at")]
    pub flat: Option<usize>,

    /// Index triple 'CHANNEL,ATOM,DIM' to flatten (pair 'ATOM,DIM' when --nout is 1); negatives wrap.
    #[arg(long, value_name = "I,J[,K]", allow_hyphen_values = true)]
    pub at: Option<String>,
}
