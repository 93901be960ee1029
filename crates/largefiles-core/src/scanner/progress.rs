/// Scan progress reporting — lightweight messages sent from the scan
/// thread to the caller via a crossbeam channel.

use std::path::PathBuf;
use std::time::Duration;

/// Progress updates sent from the scan thread.
///
/// Results themselves are returned by the walk; these messages carry only
/// counters and status.
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Periodic update with running totals.
    Update {
        entries_seen: u64,
        large_files: u64,
        current_path: PathBuf,
    },
    /// An unreadable entry was skipped (only under skip-and-continue).
    Skipped {
        path: Option<PathBuf>,
        message: String,
    },
    /// The walk finished without a fatal error.
    Complete {
        duration: Duration,
        large_files: u64,
        skipped: u64,
    },
}
