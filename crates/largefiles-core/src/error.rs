/// Error types for the scanning engine.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The ignore file could not be loaded. Callers treat this as a warning and
/// continue with an empty pattern set.
#[derive(Debug, Error)]
pub enum IgnoreFileError {
    #[error("ignore file {} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("could not read ignore file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IgnoreFileError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Unreadable { path, source }
        }
    }
}

/// Fatal scan failures.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An entry could not be visited while walking (permission denied,
    /// vanished file, failed stat).
    #[error("traversal failed at {}: {message}", display_path(.path))]
    Traversal {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("scanner thread panicked")]
    WorkerPanicked,
}

impl ScanError {
    pub(crate) fn from_walk(err: &jwalk::Error) -> Self {
        Self::Traversal {
            path: err.path().map(|p| p.to_path_buf()),
            message: err
                .io_error()
                .map(|io_err| io_err.to_string())
                .unwrap_or_else(|| err.to_string()),
        }
    }

    pub(crate) fn from_io(path: PathBuf, err: &io::Error) -> Self {
        Self::Traversal {
            path: Some(path),
            message: err.to_string(),
        }
    }
}

/// Failures while rendering a finished scan.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode CSV report: {0}")]
    Csv(#[from] csv::Error),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown path>".to_string())
}
