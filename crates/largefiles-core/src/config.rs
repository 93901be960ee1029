/// Scan configuration — the knobs the walker is constructed with.
///
/// Everything that used to be a compile-time constant (threshold, ignore-file
/// name) lives here so tests and the CLI can vary it per scan.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bytes in one MiB. Sizes are binary throughout.
pub const MIB: u64 = 1024 * 1024;

/// Default reporting threshold: files strictly larger than 50 MiB.
pub const DEFAULT_THRESHOLD_BYTES: u64 = 50 * MIB;

/// Default ignore file, looked up inside the scan root.
pub const DEFAULT_IGNORE_FILE_NAME: &str = ".gitignore";

/// What the walker does when an entry cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop the whole scan on the first unreadable entry.
    #[default]
    Abort,
    /// Record the entry as skipped and keep walking.
    SkipAndContinue,
}

/// Options recognised by [`Walker`](crate::scanner::walker::Walker).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Files must be strictly larger than this to be reported.
    pub threshold_bytes: u64,
    /// Name of the ignore file, resolved relative to the scan root.
    pub ignore_file_name: String,
    /// Behaviour on per-entry I/O errors.
    pub error_policy: ErrorPolicy,
    /// Directory-reader threads. `1` walks serially on the calling thread.
    pub threads: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold_bytes: DEFAULT_THRESHOLD_BYTES,
            ignore_file_name: DEFAULT_IGNORE_FILE_NAME.to_string(),
            error_policy: ErrorPolicy::default(),
            threads: num_cpus::get(),
        }
    }
}

impl ScanConfig {
    pub fn with_threshold_bytes(mut self, threshold_bytes: u64) -> Self {
        self.threshold_bytes = threshold_bytes;
        self
    }

    pub fn with_threshold_mib(self, mib: u64) -> Self {
        self.with_threshold_bytes(mib.saturating_mul(MIB))
    }

    pub fn with_ignore_file_name(mut self, name: impl Into<String>) -> Self {
        self.ignore_file_name = name.into();
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Zero is clamped to one.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Full path of the ignore file for a scan of `root`.
    pub fn ignore_file_path(&self, root: &Path) -> PathBuf {
        root.join(&self.ignore_file_name)
    }
}
