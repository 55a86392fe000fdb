//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use simplelog::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "checklist-cli")]
#[command(author, version, about = "Print a tri-state checklist tree", long_about = None)]
pub struct Cli {
    /// Tree document (JSON with a `result` root list). Uses the bundled sample if omitted.
    pub input: Option<PathBuf>,

    /// Toggle the node with this id. Repeat to apply several toggles in order.
    #[arg(short, long = "toggle", value_name = "ID")]
    pub toggles: Vec<u64>,

    /// Print only the selected ids after applying toggles
    #[arg(long)]
    pub ids: bool,

    /// Write logs here instead of the platform cache directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level for the verbosity count.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
