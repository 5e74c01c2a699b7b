//! CLI argument parsing for diffstats.
//!
//! Uses clap derive macros. The binary maps these arguments onto a
//! [`Config`] and a report [`Format`]; all analysis lives in the library.

use crate::config::{Config, Strategy};
use crate::report::Format;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Count regions, changed lines and call sites in a directory of unified diffs.
#[derive(Parser, Debug)]
#[command(name = "diffstats")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the diff files.
    #[arg(default_value = "./diffs")]
    pub dir: PathBuf,

    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fan-out strategy (overrides the config file).
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Worker count for the per-cpu strategy; 0 uses every processor.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Report how long the computation took.
    #[arg(long)]
    pub timing: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Serial,
    PerFile,
    PerCpu,
}

impl From<StrategyArg> for Strategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Serial => Strategy::Serial,
            StrategyArg::PerFile => Strategy::PerFile,
            StrategyArg::PerCpu => Strategy::PerCpu,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => Format::Text,
            OutputFormat::Json => Format::Json,
        }
    }
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Apply flags that override configuration values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
    }

    /// The line printed to stderr for `--timing`, if requested.
    pub fn timing_message(&self, elapsed: Duration) -> Option<String> {
        self.timing
            .then(|| format!("compute diff took {:?}", elapsed))
    }

    /// Default log level for the given number of `-v` flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
