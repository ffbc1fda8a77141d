use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A line/column range in the original `.proto` source.
///
/// Lines and columns are 1-based. A span of all zeros is the
/// [`SourceSpan::UNKNOWN`] sentinel, used when a file was parsed without
/// positional metadata; callers must treat it as valid-but-unlocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceSpan {
    /// Sentinel for descriptors with no recorded position.
    pub const UNKNOWN: Self = Self {
        start_line: 0,
        start_column: 0,
        end_line: 0,
        end_column: 0,
    };

    #[must_use]
    pub const fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Create a span confined to a single line.
    #[must_use]
    pub const fn on_line(line: u32, start_column: u32, end_column: u32) -> Self {
        Self::new(line, start_column, line, end_column)
    }

    /// False for the [`SourceSpan::UNKNOWN`] sentinel.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.start_line != 0
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(
                f,
                "{}:{}-{}:{}",
                self.start_line, self.start_column, self.end_line, self.end_column
            )
        } else {
            f.write_str("<unknown>")
        }
    }
}

/// Structural path addressing one declaration (or a part of one) from the
/// file root, as a sequence of container-field-number / index segments.
///
/// This is the `SourceCodeInfo.location.path` scheme: `[4, 0, 2, 1]` is the
/// second field of the first message in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourcePath(Vec<i32>);

impl SourcePath {
    /// The empty path, addressing the file itself.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn push(&mut self, segment: i32) {
        self.0.push(segment);
    }

    /// Extend with a caller-supplied suffix, e.g. an options sub-path
    /// addressing one element of a repeated annotation.
    #[must_use]
    pub fn join(&self, suffix: &[i32]) -> Self {
        let mut segments = self.0.clone();
        segments.extend_from_slice(suffix);
        Self(segments)
    }
}

impl From<Vec<i32>> for SourcePath {
    fn from(segments: Vec<i32>) -> Self {
        Self(segments)
    }
}

impl From<&[i32]> for SourcePath {
    fn from(segments: &[i32]) -> Self {
        Self(segments.to_vec())
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

/// Comments attached to one declaration in the original source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    /// Comment block immediately above the declaration.
    pub leading: Option<String>,
    /// Comment on the same line, after the declaration.
    pub trailing: Option<String>,
    /// Comment blocks above the declaration separated from it (and from
    /// each other) by blank lines.
    pub leading_detached: Vec<String>,
}

impl Comments {
    /// Leading and trailing comment text, in that order.
    pub fn attached(&self) -> impl Iterator<Item = &str> {
        self.leading
            .as_deref()
            .into_iter()
            .chain(self.trailing.as_deref())
    }
}

/// Everything recorded about one structural path at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub span: SourceSpan,
    pub comments: Comments,
}

impl Location {
    #[must_use]
    pub fn new(span: SourceSpan) -> Self {
        Self {
            span,
            comments: Comments::default(),
        }
    }
}

/// Side table of recorded positions and comments, keyed by structural path.
///
/// Recorded once at parse time; lookups on a path with no entry yield
/// [`SourceSpan::UNKNOWN`] rather than an error.
#[derive(Debug, Clone, Default)]
pub struct SourceInfo {
    locations: HashMap<SourcePath, Location>,
}

impl SourceInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn record(&mut self, path: SourcePath, location: Location) {
        self.locations.insert(path, location);
    }

    #[must_use]
    pub fn location(&self, path: &SourcePath) -> Option<&Location> {
        self.locations.get(path)
    }

    /// Span for a path, or the unknown sentinel when none was recorded.
    #[must_use]
    pub fn span(&self, path: &SourcePath) -> SourceSpan {
        self.locations
            .get(path)
            .map_or(SourceSpan::UNKNOWN, |location| location.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_span_is_not_known() {
        assert!(!SourceSpan::UNKNOWN.is_known());
        assert!(SourceSpan::on_line(1, 1, 10).is_known());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(SourceSpan::new(3, 1, 5, 2).to_string(), "3:1-5:2");
        assert_eq!(SourceSpan::UNKNOWN.to_string(), "<unknown>");
    }

    #[test]
    fn test_path_join_does_not_mutate() {
        let base = SourcePath::from(vec![4, 0]);
        let extended = base.join(&[2, 1]);
        assert_eq!(base.as_slice(), &[4, 0]);
        assert_eq!(extended.as_slice(), &[4, 0, 2, 1]);
    }

    #[test]
    fn test_missing_entry_yields_unknown() {
        let info = SourceInfo::new();
        assert_eq!(info.span(&SourcePath::root()), SourceSpan::UNKNOWN);
        assert!(info.location(&SourcePath::root()).is_none());
    }

    #[test]
    fn test_record_and_lookup() {
        let mut info = SourceInfo::new();
        let path = SourcePath::from(vec![4, 0]);
        info.record(path.clone(), Location::new(SourceSpan::on_line(7, 1, 20)));
        assert_eq!(info.span(&path), SourceSpan::on_line(7, 1, 20));
    }

    #[test]
    fn test_attached_comments_order() {
        let comments = Comments {
            leading: Some("above".to_string()),
            trailing: Some("beside".to_string()),
            leading_detached: vec!["far above".to_string()],
        };
        let attached: Vec<_> = comments.attached().collect();
        assert_eq!(attached, vec!["above", "beside"]);
    }
}
