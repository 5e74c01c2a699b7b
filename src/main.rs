//! Entry point for the `diffstats` CLI.
//!
//! Parses arguments, loads configuration, runs the analysis and prints the
//! report. Errors are printed to stderr and mapped to exit codes.

use diffstats::cli::Cli;
use diffstats::config::Config;
use diffstats::{exit_codes, report};
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(cli.log_level());
    builder.parse_default_env();
    builder.init();
}

fn run(cli: &Cli) -> diffstats::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);

    let started = Instant::now();
    let stats = diffstats::compute(&cli.dir, &config)?;
    let elapsed = started.elapsed();

    log::info!(
        "{} file(s), {} region(s), +{} -{}",
        stats.files.len(),
        stats.regions,
        stats.lines_added,
        stats.lines_deleted
    );
    if let Some(message) = cli.timing_message(elapsed) {
        eprintln!("{}", message);
    }

    print!("{}", report::render(&stats, cli.format.into())?);
    Ok(())
}
