/// largefiles core — traversal, ignore-pattern filtering, and reporting.
///
/// This crate contains all scanning logic with no CLI dependencies.
///
/// # Modules
///
/// - [`config`] — Scan configuration (threshold, ignore file, error policy).
/// - [`filter`] — Ignore-file patterns and the exclusion matcher.
/// - [`scanner`] — Directory walker, result collector, background scans.
/// - [`model`] — File records and size formatting.
/// - [`report`] — Sorting and text/JSON/CSV rendering of results.
/// - [`error`] — Error types.
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod report;
pub mod scanner;

pub use config::{ErrorPolicy, ScanConfig};
pub use error::{IgnoreFileError, ReportError, ScanError};
pub use filter::{is_excluded, Matcher, PatternSet};
pub use model::FileRecord;
pub use scanner::walker::{ScanOutcome, Walker};
