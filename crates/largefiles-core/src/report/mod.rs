/// Rendering of a finished scan.
///
/// Sorting happens here, not in the collector: records are ordered by
/// descending size, ties broken by path so output is reproducible.
use crate::config::ScanConfig;
use crate::error::ReportError;
use crate::model::size::{format_mib, format_threshold};
use crate::model::FileRecord;
use crate::scanner::walker::{ScanOutcome, ScanStats, SkippedEntry};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Output formats supported by the CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Sort largest first; equal sizes by path.
pub fn sort_by_size_desc(records: &mut [FileRecord]) {
    records.sort_unstable_by(|a, b| {
        b.size_bytes()
            .cmp(&a.size_bytes())
            .then_with(|| a.path().cmp(b.path()))
    });
}

/// Everything a renderer needs about one scan.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub root: &'a Path,
    pub threshold_bytes: u64,
    pub ignore_file: &'a str,
    /// Non-fatal problems, e.g. an unreadable ignore file.
    pub warnings: Vec<String>,
    /// Sorted largest first.
    pub records: Vec<FileRecord>,
    pub skipped: &'a [SkippedEntry],
    pub stats: ScanStats,
    pub elapsed_ms: u128,
}

impl<'a> Report<'a> {
    /// Build a report, sorting the outcome's records.
    pub fn new(
        root: &'a Path,
        config: &'a ScanConfig,
        outcome: &'a ScanOutcome,
        warnings: Vec<String>,
    ) -> Self {
        let mut records = outcome.records.clone();
        sort_by_size_desc(&mut records);
        Self {
            root,
            threshold_bytes: config.threshold_bytes,
            ignore_file: &config.ignore_file_name,
            warnings,
            records,
            skipped: &outcome.skipped,
            stats: outcome.stats,
            elapsed_ms: outcome.duration.as_millis(),
        }
    }

    pub fn write(&self, format: OutputFormat, out: &mut impl Write) -> Result<(), ReportError> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => self.write_json(out),
            OutputFormat::Csv => self.write_csv(out),
        }
    }

    /// Human-readable listing.
    pub fn write_text(&self, out: &mut impl Write) -> Result<(), ReportError> {
        let threshold = format_threshold(self.threshold_bytes);
        for warning in &self.warnings {
            writeln!(out, "Warning: {warning}")?;
        }
        writeln!(
            out,
            "Searching for files larger than {threshold} MiB in: {}",
            self.root.display()
        )?;
        writeln!(out, "(Respecting {} rules)", self.ignore_file)?;

        if self.records.is_empty() {
            writeln!(out, "\nNo files larger than {threshold} MiB found.")?;
        } else {
            writeln!(out, "\nLarge files found:")?;
            for record in &self.records {
                writeln!(
                    out,
                    "{}: {} MiB",
                    record.path().display(),
                    format_mib(record.size_bytes())
                )?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(out, "\nSkipped {} unreadable entries:", self.skipped.len())?;
            for entry in self.skipped {
                let path = entry
                    .path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                writeln!(out, "{path}: {}", entry.message)?;
            }
        }

        writeln!(out, "\nTotal number of large files: {}", self.records.len())?;
        Ok(())
    }

    /// Whole report as one pretty-printed JSON document.
    pub fn write_json(&self, out: &mut impl Write) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }

    /// One row per record: `path,size_bytes,size_mib`.
    pub fn write_csv(&self, out: &mut impl Write) -> Result<(), ReportError> {
        #[derive(Serialize)]
        struct Row<'r> {
            path: std::borrow::Cow<'r, str>,
            size_bytes: u64,
            size_mib: String,
        }

        let mut writer = csv::Writer::from_writer(out);
        for record in &self.records {
            writer.serialize(Row {
                path: record.path().to_string_lossy(),
                size_bytes: record.size_bytes(),
                size_mib: format_mib(record.size_bytes()),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}
