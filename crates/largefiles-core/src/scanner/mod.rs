/// Scanner module — orchestrates a large-file scan.
///
/// - [`walker`] does the traversal and filtering on the calling thread.
/// - [`collector`] gathers results from concurrent discovery tasks.
/// - [`start_scan`] runs a walk on a background thread and streams
///   [`ScanProgress`] messages while it runs.
pub mod collector;
pub mod progress;
pub mod walker;

use crate::config::ScanConfig;
use crate::error::{IgnoreFileError, ScanError};
use crate::filter::PatternSet;
use progress::ScanProgress;
use walker::{ScanOutcome, Walker};

use crossbeam_channel::Receiver;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{info, warn};

pub use collector::Collector;

/// Maximum number of progress messages that may queue up in the channel.
///
/// A consumer that falls behind stalls the scanner briefly rather than
/// letting the queue grow without bound.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Load the ignore file configured for `root`.
///
/// A missing or unreadable file is not fatal: the warning is logged and
/// returned alongside an empty pattern set so the caller can surface it.
pub fn load_patterns(root: &Path, config: &ScanConfig) -> (PatternSet, Option<IgnoreFileError>) {
    let path = config.ignore_file_path(root);
    match PatternSet::load(&path) {
        Ok(patterns) => (patterns, None),
        Err(err) => {
            warn!("{err}; continuing without ignore patterns");
            (PatternSet::default(), Some(err))
        }
    }
}

/// Handle to a running or completed background scan.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    thread: thread::JoinHandle<Result<ScanOutcome, ScanError>>,
}

impl ScanHandle {
    /// Wait for the scan to finish and return its outcome.
    ///
    /// The progress receiver is dropped first so a scanner blocked on a full
    /// channel can always make progress.
    pub fn join(self) -> Result<ScanOutcome, ScanError> {
        let Self {
            progress_rx,
            thread,
        } = self;
        drop(progress_rx);
        thread.join().map_err(|_| ScanError::WorkerPanicked)?
    }
}

/// Start a scan of `root_path` on a background thread.
pub fn start_scan(
    root_path: PathBuf,
    config: ScanConfig,
    patterns: PatternSet,
) -> Result<ScanHandle, ScanError> {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let walker = Walker::new(config, patterns);

    let thread = thread::Builder::new()
        .name("largefiles-scanner".into())
        .spawn(move || {
            info!("Starting scan of {}", root_path.display());
            walker.walk_with_progress(&root_path, Some(&progress_tx))
        })
        .map_err(ScanError::Spawn)?;

    Ok(ScanHandle {
        progress_rx,
        thread,
    })
}
