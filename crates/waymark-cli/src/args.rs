//! Command-line argument definitions for the Waymark CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the layout mode, and logging verbosity.

use clap::Parser;

use waymark::config::LayoutMode;

/// Command-line arguments for the Waymark flow layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input flow graph (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Layout mode (tree, swim-lane, auto); overrides the configured mode
    #[arg(short, long)]
    pub mode: Option<LayoutMode>,

    /// Fail on graphs without a root instead of writing them unpositioned
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
