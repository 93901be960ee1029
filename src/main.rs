//! largefiles — report oversized files under a directory.
//!
//! Thin binary entry point. All scanning logic lives in `largefiles-core`.

mod cli;

use anyhow::Context;
use clap::Parser;
use largefiles_core::model::size::format_count;
use largefiles_core::report::{OutputFormat, Report};
use largefiles_core::scanner::progress::ScanProgress;
use largefiles_core::scanner::{load_patterns, start_scan};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // Logs go to stderr so stdout stays a clean report.
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    let root = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    let config = args.scan_config();
    let format = OutputFormat::from(args.format);

    let (patterns, ignore_warning) = load_patterns(&root, &config);
    let mut warnings: Vec<String> = ignore_warning.iter().map(ToString::to_string).collect();
    if format == OutputFormat::Text {
        // Text output reports warnings up front, before the scan runs.
        for warning in warnings.drain(..) {
            println!("Warning: {warning}");
        }
    }

    let handle = start_scan(root.clone(), config.clone(), patterns)?;
    for message in handle.progress_rx.iter() {
        match message {
            ScanProgress::Update {
                entries_seen,
                large_files,
                current_path,
            } => tracing::info!(
                "{} entries scanned, {} large files so far ({})",
                format_count(entries_seen),
                format_count(large_files),
                current_path.display()
            ),
            // Already logged by the walker.
            ScanProgress::Skipped { .. } => {}
            ScanProgress::Complete {
                duration,
                large_files,
                skipped,
            } => tracing::info!(
                "Finished in {duration:?}: {large_files} large files, {skipped} skipped entries"
            ),
        }
    }
    let outcome = handle
        .join()
        .with_context(|| format!("scan of {} failed", root.display()))?;

    let report = Report::new(&root, &config, &outcome, warnings);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report
        .write(format, &mut out)
        .context("failed to write report")?;
    out.flush()?;

    Ok(())
}
