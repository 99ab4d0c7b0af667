use std::path::PathBuf;

use clap::Parser;

/// Command-line surface from §6.1. With no script, starts the REPL.
#[derive(Parser, Debug)]
#[command(name = "vnlang", about = "Interpreter for the VNlang scripting language")]
pub struct Cli {
    /// Script to run. If omitted, starts the REPL.
    pub script: Option<PathBuf>,

    /// Arguments forwarded to the script as `tham_số` (argv[1..]).
    pub args: Vec<String>,

    /// Accepted for compatibility with the original profiling hook; this
    /// crate performs no profiling, it only records that a path was given.
    #[arg(long = "đo_đạc", value_name = "profile.out")]
    pub perf_out: Option<PathBuf>,

    /// Raise logging verbosity from Info to Debug.
    #[arg(short, long)]
    pub verbose: bool,
}
