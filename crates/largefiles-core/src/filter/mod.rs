/// Ignore-pattern filtering — loading an ignore file and deciding which
/// walked paths it excludes.

pub mod matcher;
pub mod pattern_set;

pub use matcher::{is_excluded, Matcher};
pub use pattern_set::{Pattern, PatternSet};
