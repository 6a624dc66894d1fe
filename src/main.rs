use std::io::{self, IsTerminal};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug, info};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use check_photo_dups::{Cli, Settings, format_human_elapsed, local_offset, run};

fn init_logger(verbose: bool) -> Result<()> {
    let mut builder = ConfigBuilder::new();
    // Falls back to UTC if the local offset cannot be determined.
    let _ = builder.set_time_offset_to_local();
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let color = if io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    TermLogger::init(level, builder.build(), TerminalMode::Stderr, color)?;
    Ok(())
}

fn main() -> Result<()> {
    let start_time = Instant::now();
    // Resolve before any thread is spawned.
    let offset = local_offset();
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    debug!("Command line arguments: {:?}", cli);

    // Fatal errors are reported once, by anyhow, when main returns.
    let settings = Settings::from_cli(&cli)?;
    debug!("Resolved settings: {:?}", settings);

    let summary = run(&settings, offset, &mut io::stdout())?;
    debug!("Run summary: {:?}", summary);

    info!(
        "Completed in {}",
        format_human_elapsed(start_time.elapsed())
    );
    Ok(())
}
