/// Exclusion decisions for walked paths.
///
/// A path is excluded when any pattern matches either its basename or the
/// full path as the walker produced it (relative roots stay relative, with
/// `.` components dropped). This approximates ignore-file behaviour; there is no anchoring,
/// no `!` negation and no recursive `**`.
use super::pattern_set::PatternSet;
use std::path::Path;
use std::sync::Arc;

/// Cheaply clonable handle over a shared, read-only [`PatternSet`].
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    patterns: Arc<PatternSet>,
}

impl Matcher {
    pub fn new(patterns: PatternSet) -> Self {
        Self {
            patterns: Arc::new(patterns),
        }
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    #[inline]
    pub fn is_excluded(&self, path: &Path) -> bool {
        is_excluded(path, &self.patterns)
    }
}

/// Check `path` against every pattern in order, stopping at the first hit.
pub fn is_excluded(path: &Path, patterns: &PatternSet) -> bool {
    if patterns.is_empty() {
        return false;
    }
    // Paths like `/` or `..` have no file name; match the whole path instead.
    let basename = path.file_name().map(Path::new).unwrap_or(path);
    patterns
        .iter()
        .any(|pattern| pattern.matches(basename) || pattern.matches(path))
}
