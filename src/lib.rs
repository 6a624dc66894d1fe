pub mod cli;
pub mod config;
pub mod duplicates;
pub mod export;
pub mod fingerprint;
pub mod report;
pub mod scanner;
pub mod utils;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{HumanCount, ProgressBar, ProgressStyle};
use log::info;
use time::UtcOffset;

pub use cli::Cli;
pub use config::{FileConfig, Settings};
pub use duplicates::{Analysis, DuplicateStats, HashGroup, ListingRow, Status, group};
pub use export::{ExportError, export_csv, write_csv};
pub use fingerprint::{FileRecord, FingerprintBatch, FingerprintError, fingerprint, fingerprint_all};
pub use scanner::{DEFAULT_EXTENSIONS, PatternSet, discover, resolve_root};
pub use utils::{format_human_elapsed, format_mb, local_offset};

/// What a completed run found. Returned for callers that want more than the
/// console report.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_found: usize,
    pub skipped: usize,
    pub stats: DuplicateStats,
    pub exported: Option<PathBuf>,
}

/// Runs the scan, hash, group and report pipeline, writing the console report
/// to `out`.
///
/// Only an unusable root path, a bad pattern or a failed CSV export abort the
/// run; files that cannot be read are logged and left out.
pub fn run<W: Write>(settings: &Settings, offset: UtcOffset, out: &mut W) -> Result<RunSummary> {
    let root = resolve_root(&settings.path)?;
    let patterns = PatternSet::new(&settings.extensions, settings.case_sensitive)?;
    info!("Target directory: '{}'", root.display());

    let spinner = new_spinner(settings.progress);
    let paths = discover(&root, &patterns);
    spinner.finish_and_clear();

    if paths.is_empty() {
        report::print_no_files(out)?;
        return Ok(RunSummary::default());
    }

    let progress_bar = new_progress_bar(settings.progress, paths.len() as u64);
    let batch = fingerprint_all(&paths, settings.threads, |done, _total| {
        progress_bar.set_position(done as u64);
    })?;
    progress_bar.finish_and_clear();

    let analysis = Analysis::new(&batch.records);
    let stats = analysis.stats();

    report::print_summary(out, &stats, batch.skipped)?;
    if settings.show_duplicates_only {
        report::print_duplicate_groups(out, &analysis, offset)?;
    } else {
        report::print_listing(out, &analysis.listing(), offset)?;
    }
    out.flush()?;

    let exported = match &settings.output_file {
        Some(path) => {
            export_csv(path, &analysis.listing(), offset)
                .with_context(|| format!("Failed to export report to '{}'", path.display()))?;
            info!(
                "Exported {} rows to '{}'",
                HumanCount(batch.records.len() as u64),
                path.display()
            );
            Some(path.clone())
        }
        None => None,
    };

    Ok(RunSummary {
        files_found: paths.len(),
        skipped: batch.skipped,
        stats,
        exported,
    })
}

fn new_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_message("Scanning for photos...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn new_progress_bar(enabled: bool, total: u64) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
