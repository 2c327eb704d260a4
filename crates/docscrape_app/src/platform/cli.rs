use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use docscrape_engine::Mode;

/// Scrapes the Python documentation and PEP sites.
#[derive(Debug, Parser)]
#[command(name = "docscrape", version, about)]
pub struct Cli {
    /// What to scrape.
    #[arg(value_enum)]
    pub mode: ModeArg,

    /// Where to send tabular results; printed line by line when omitted.
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,

    /// Empty the HTTP response cache before running.
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Directory holding downloads, results, logs and the cache.
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// RON configuration file overriding the built-in defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug messages, including per-page progress.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::WhatsNew => Mode::WhatsNew,
            ModeArg::LatestVersions => Mode::LatestVersions,
            ModeArg::Download => Mode::Download,
            ModeArg::Pep => Mode::Pep,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Aligned table on stdout.
    Pretty,
    /// CSV file in the results directory.
    File,
}
