use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

/// Hermes NWM output assembler and forcing relocator.
#[derive(Parser)]
#[command(
    name = "hermes",
    version,
    about = "Assemble NWM forecast output and relocate NWM forcing for WRF-Hydro"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Assemble per-file output into one reference_time x time dataset.
    Assemble(AssembleArgs),
    /// Rebuild NOMADS forcing as an LDASIN directory tree.
    Relocate(RelocateArgs),
    /// Check that files listed in the namelists exist.
    Audit(AuditArgs),
    /// Report NA values in NetCDF files using nccmp.
    Nas(NasArgs),
}

/// Arguments for the `assemble` subcommand.
#[derive(clap::Args)]
pub struct AssembleArgs {
    /// Per-time output files, in any order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Treat the files as a single non-forecast run.
    #[arg(long)]
    pub no_forecast: bool,

    /// Chunking hint as DIM=LEN; may be repeated.
    #[arg(long = "chunk", value_name = "DIM=LEN")]
    pub chunks: Vec<String>,

    /// Write the JSON summary here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `relocate` subcommand.
#[derive(clap::Args)]
#[command(group(ArgGroup::new("input").args(["source", "days"])))]
pub struct RelocateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding nwm.YYYYMMDD day directories.
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Explicit day directories to relocate.
    #[arg(long, num_args = 1..)]
    pub days: Vec<PathBuf>,

    /// Destination root for the LDASIN tree.
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Range category, e.g. medium_range or short_range_hawaii.
    #[arg(short, long)]
    pub range: Option<String>,

    /// Copy files instead of symlinking them.
    #[arg(long)]
    pub copy: bool,

    /// Output naming: 1 (YYYYMMDDHH) or 2 (YYYYMMDDHH00).
    #[arg(long)]
    pub forc_type: Option<u8>,

    /// Existing destination entries: reject or replace.
    #[arg(long)]
    pub overwrite: Option<String>,
}

/// Arguments for the `audit` subcommand.
#[derive(clap::Args)]
pub struct AuditArgs {
    /// Hydro namelist as JSON.
    #[arg(long)]
    pub hydro: PathBuf,

    /// HRLDAS namelist as JSON.
    #[arg(long)]
    pub hrldas: PathBuf,

    /// Simulation directory the namelist paths are relative to.
    #[arg(long, default_value = ".")]
    pub sim_dir: PathBuf,

    /// Do not require restart files.
    #[arg(long)]
    pub ignore_restarts: bool,

    /// Warn about missing files instead of failing.
    #[arg(long)]
    pub warn_only: bool,
}

/// Arguments for the `nas` subcommand.
#[derive(clap::Args)]
pub struct NasArgs {
    /// NetCDF files to check.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comparator executable.
    #[arg(long)]
    pub nccmp: Option<PathBuf>,
}
