use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "openwith-sweep")]
#[command(author, version, about = "Reset per-file 'open with' overrides to the system default")]
#[command(long_about = "Scans a directory tree for files whose metadata pins them to a\n\
    specific handler and clears that override, restoring the system default.\n\n\
    Exit codes:\n  \
    0 - Run completed\n  \
    1 - Run incomplete (per-file errors, cancellation, or declined confirmation)\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate, then clear overrides across a directory tree
    Run(RunArgs),

    /// Sample the tree and report the estimated hit rate without clearing
    Sample(SampleArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Directory tree to sweep
    pub path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suffix categories to target (comma-separated, e.g., pdf,html,txt)
    #[arg(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Extended attribute to clear (overrides config)
    #[arg(long)]
    pub attr: Option<String>,

    /// Report what would change without touching any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Worker count (0 = auto-detect from available cores)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Estimated-hit ceiling above which confirmation is required
    #[arg(long)]
    pub max_files: Option<u64>,

    /// Number of files to probe during the sampling estimate
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Smallest sample allowed to skip the full pass on zero hits
    #[arg(long)]
    pub min_sample: Option<u64>,

    /// Skip the sampling estimate and run the full pass directly
    #[arg(long)]
    pub no_sample: bool,

    /// Assume "yes" for any confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Stop dispatching new files after the first per-file failure
    #[arg(long)]
    pub halt_on_error: bool,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Directory tree to sample
    pub path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suffix categories to target (comma-separated, e.g., pdf,html,txt)
    #[arg(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Extended attribute to probe (overrides config)
    #[arg(long)]
    pub attr: Option<String>,

    /// Number of files to probe
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = ".openwith-sweep.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
