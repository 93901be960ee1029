/// Ignore-file loading.
///
/// An ignore file is parsed into an ordered list of [`Pattern`]s. Each
/// pattern keeps its original text and a compiled glob; the glob is compiled
/// once here so the walker never re-parses pattern text per entry.
use crate::error::IgnoreFileError;
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One ignore rule, taken verbatim (trimmed) from a line of the ignore file.
#[derive(Clone, Debug)]
pub struct Pattern {
    text: String,
    /// `None` when the text is not a valid glob. Such patterns never match.
    glob: Option<GlobMatcher>,
}

impl Pattern {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let glob = match GlobBuilder::new(&shell_glob_syntax(&text))
            .literal_separator(true)
            .build()
        {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(err) => {
                debug!("Ignoring malformed pattern {text:?}: {err}");
                None
            }
        };
        Self { text, glob }
    }

    /// The pattern exactly as loaded.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.glob.is_some()
    }

    /// Match against a single string (a basename or a full path).
    #[inline]
    pub fn matches(&self, candidate: &Path) -> bool {
        self.glob
            .as_ref()
            .is_some_and(|glob| glob.is_match(candidate))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Pattern {}

/// Ordered, immutable collection of ignore patterns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Read and parse an ignore file.
    ///
    /// A missing or unreadable file is returned as an error; callers are
    /// expected to warn and fall back to [`PatternSet::default`].
    pub fn load(path: &Path) -> Result<Self, IgnoreFileError> {
        let bytes =
            fs::read(path).map_err(|err| IgnoreFileError::from_io(path.to_path_buf(), err))?;
        let set = Self::parse(&String::from_utf8_lossy(&bytes));
        debug!(
            "Loaded {} ignore patterns from {}",
            set.len(),
            path.display()
        );
        Ok(set)
    }

    /// Parse ignore-file text. Blank lines and `#` comments are dropped,
    /// everything else is trimmed and kept in order, duplicates included.
    pub fn parse(contents: &str) -> Self {
        Self::from_patterns(contents.lines().filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some(line)
            }
        }))
    }

    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Pattern::new).collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Rewrite a pattern into `globset` syntax with plain shell-glob meaning.
///
/// `globset` gives `**` recursive meaning and `{a,b}` alternation. Neither
/// belongs to the simple dialect used here: a run of stars collapses to a
/// single `*`, and braces outside a character class become literal classes.
fn shell_glob_syntax(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                out.push(ch);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(ch);
                // A leading `]` (optionally after negation) is a literal member.
                if matches!(chars.peek(), Some('!') | Some('^')) {
                    out.extend(chars.next());
                }
                if chars.peek() == Some(&']') {
                    out.extend(chars.next());
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(ch);
            }
            '*' if !in_class => {
                out.push('*');
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
            }
            '{' | '}' if !in_class => {
                out.push('[');
                out.push(ch);
                out.push(']');
            }
            _ => out.push(ch),
        }
    }
    out
}
