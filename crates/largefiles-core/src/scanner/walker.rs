/// Depth-first directory walker built on `jwalk`.
///
/// Directory reads may run on a dedicated rayon pool inside `jwalk`, but
/// entries are consumed by a single loop in depth-first, name-sorted order.
/// Excluded directories are pruned inside `process_read_dir`, so their
/// children are never read from disk.
///
/// # Collection
///
/// Every qualifying file is handed to the [`Collector`] by a task spawned
/// inside a `rayon::scope`. The scope is the join barrier: it returns only
/// after every append has run, including when the walk stops early on a
/// fatal error.
use crate::config::{ErrorPolicy, ScanConfig};
use crate::error::ScanError;
use crate::filter::{Matcher, PatternSet};
use crate::model::FileRecord;
use crate::scanner::collector::Collector;
use crate::scanner::progress::ScanProgress;
use crossbeam_channel::Sender;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Entries between two `ScanProgress::Update` messages.
const PROGRESS_INTERVAL: u64 = 5_000;

type Entry = jwalk::DirEntry<((), ())>;

/// An entry that could not be read and was skipped under
/// [`ErrorPolicy::SkipAndContinue`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Counters gathered during one walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Every item yielded by the walker, errors included.
    pub entries_seen: u64,
    pub dirs_seen: u64,
    /// Directories whose contents were never read because a pattern matched.
    pub dirs_pruned: u64,
    pub files_seen: u64,
    pub files_excluded: u64,
    pub large_files: u64,
}

/// Result of a completed walk.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Oversized, non-excluded files in no particular order.
    pub records: Vec<FileRecord>,
    pub skipped: Vec<SkippedEntry>,
    pub stats: ScanStats,
    pub duration: Duration,
}

/// Walks one root with a fixed configuration and pattern set.
#[derive(Clone, Debug)]
pub struct Walker {
    config: ScanConfig,
    matcher: Matcher,
}

impl Walker {
    pub fn new(config: ScanConfig, patterns: PatternSet) -> Self {
        Self {
            config,
            matcher: Matcher::new(patterns),
        }
    }

    /// Walk `root` and return every oversized, non-excluded file.
    pub fn walk(&self, root: &Path) -> Result<ScanOutcome, ScanError> {
        self.walk_with_progress(root, None)
    }

    /// Like [`walk`](Self::walk), additionally streaming progress messages.
    ///
    /// `progress_tx` is a bounded channel; the receiver must keep draining it
    /// (or be dropped) or the walk stalls once the channel is full.
    pub fn walk_with_progress(
        &self,
        root: &Path,
        progress_tx: Option<&Sender<ScanProgress>>,
    ) -> Result<ScanOutcome, ScanError> {
        let start = Instant::now();
        let root = clean_path(root);
        let root = root.as_path();
        let mut skipped: Vec<SkippedEntry> = Vec::new();

        info!(
            "Scanning {} for files larger than {} bytes ({} patterns)",
            root.display(),
            self.config.threshold_bytes,
            self.matcher.patterns().len()
        );

        if self.matcher.is_excluded(root) {
            debug!("Scan root {} is excluded, nothing to walk", root.display());
            let stats = ScanStats::default();
            return Ok(self.finish(Vec::new(), skipped, stats, start, progress_tx));
        }

        let walker = self.build_walker(root);
        let (records, stats) = self.consume(root, walker, &mut skipped, progress_tx)?;
        Ok(self.finish(records, skipped, stats, start, progress_tx))
    }

    /// Drive `walker` to completion, returning the collected records.
    fn consume(
        &self,
        root: &Path,
        walker: jwalk::WalkDir,
        skipped: &mut Vec<SkippedEntry>,
        progress_tx: Option<&Sender<ScanProgress>>,
    ) -> Result<(Vec<FileRecord>, ScanStats), ScanError> {
        let mut stats = ScanStats::default();
        let collector = Collector::new();
        rayon::scope(|scope| -> Result<(), ScanError> {
            let mut current_path = root.to_path_buf();

            for entry_result in walker {
                stats.entries_seen += 1;

                let (inspected, read_error) = match entry_result {
                    Ok(mut entry) => {
                        current_path = clean_path(&entry.path());
                        // A directory whose children could not be listed is
                        // still yielded; the failure rides along on the entry.
                        let read_error = entry.read_children_error.take();
                        (
                            self.inspect(&entry, current_path.clone(), &mut stats),
                            read_error,
                        )
                    }
                    Err(err) => (Err(walk_error(&err)), None),
                };

                match inspected {
                    Ok(Some(record)) => {
                        stats.large_files += 1;
                        let collector = &collector;
                        scope.spawn(move |_| collector.submit(record));
                    }
                    Ok(None) => {}
                    Err(err) => self.on_error(err, skipped, progress_tx)?,
                }
                if let Some(err) = read_error {
                    self.on_error(walk_error(&err), skipped, progress_tx)?;
                }

                if stats.entries_seen.is_multiple_of(PROGRESS_INTERVAL) {
                    if let Some(tx) = progress_tx {
                        let _ = tx.send(ScanProgress::Update {
                            entries_seen: stats.entries_seen,
                            large_files: stats.large_files,
                            current_path: current_path.clone(),
                        });
                    }
                }
            }
            Ok(())
        })?;

        Ok((collector.drain(), stats))
    }

    fn build_walker(&self, root: &Path) -> jwalk::WalkDir {
        let matcher = self.matcher.clone();
        let parallelism = if self.config.threads <= 1 {
            jwalk::Parallelism::Serial
        } else {
            jwalk::Parallelism::RayonNewPool(self.config.threads)
        };

        jwalk::WalkDir::new(root)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(parallelism)
            .process_read_dir(move |_depth, _dir, _state, children| {
                for child in children.iter_mut().flatten() {
                    if child.file_type().is_dir()
                        && matcher.is_excluded(&clean_path(&child.path()))
                    {
                        // Still yielded, but never descended into.
                        child.read_children_path = None;
                    }
                }
            })
    }

    /// Classify one entry. Returns a record for oversized files, `None` for
    /// anything else, and an error if the file cannot be stat'ed.
    fn inspect(
        &self,
        entry: &Entry,
        path: PathBuf,
        stats: &mut ScanStats,
    ) -> Result<Option<FileRecord>, ScanError> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            stats.dirs_seen += 1;
            if entry.depth > 0 && entry.read_children_path.is_none() {
                stats.dirs_pruned += 1;
                debug!("Pruned {}", path.display());
            }
            return Ok(None);
        }

        // Symlinks are not followed and are not regular files.
        if !file_type.is_file() {
            return Ok(None);
        }
        stats.files_seen += 1;

        if self.matcher.is_excluded(&path) {
            stats.files_excluded += 1;
            return Ok(None);
        }

        let size = std::fs::symlink_metadata(&path)
            .map_err(|err| ScanError::from_io(path.clone(), &err))?
            .len();

        if size > self.config.threshold_bytes {
            debug!("Large file {} ({size} bytes)", path.display());
            Ok(Some(FileRecord::new(path, size)))
        } else {
            Ok(None)
        }
    }

    fn on_error(
        &self,
        err: ScanError,
        skipped: &mut Vec<SkippedEntry>,
        progress_tx: Option<&Sender<ScanProgress>>,
    ) -> Result<(), ScanError> {
        if self.config.error_policy == ErrorPolicy::Abort {
            return Err(err);
        }
        match err {
            ScanError::Traversal { path, message } => {
                warn!(
                    "Skipping {}: {message}",
                    path.as_deref().unwrap_or(Path::new("<unknown>")).display()
                );
                if let Some(tx) = progress_tx {
                    let _ = tx.send(ScanProgress::Skipped {
                        path: path.clone(),
                        message: message.clone(),
                    });
                }
                skipped.push(SkippedEntry { path, message });
                Ok(())
            }
            other => Err(other),
        }
    }

    fn finish(
        &self,
        records: Vec<FileRecord>,
        skipped: Vec<SkippedEntry>,
        stats: ScanStats,
        start: Instant,
        progress_tx: Option<&Sender<ScanProgress>>,
    ) -> ScanOutcome {
        let duration = start.elapsed();
        info!(
            "Scan complete: {} entries, {} large files, {} pruned dirs, {} skipped in {duration:?}",
            stats.entries_seen,
            records.len(),
            stats.dirs_pruned,
            skipped.len()
        );
        if let Some(tx) = progress_tx {
            let _ = tx.send(ScanProgress::Complete {
                duration,
                large_files: records.len() as u64,
                skipped: skipped.len() as u64,
            });
        }
        ScanOutcome {
            records,
            skipped,
            stats,
            duration,
        }
    }
}

/// Drop `.` components so a walk of `.` yields `build/main.o` rather than
/// `./build/main.o`. Matching and reporting both see the cleaned path.
fn clean_path(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Convert a jwalk error, cleaning its path the same way entries are cleaned.
fn walk_error(err: &jwalk::Error) -> ScanError {
    match ScanError::from_walk(err) {
        ScanError::Traversal { path, message } => ScanError::Traversal {
            path: path.map(|p| clean_path(&p)),
            message,
        },
        other => other,
    }
}
