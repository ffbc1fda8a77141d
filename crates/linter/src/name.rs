use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hierarchical rule identifier: a group (e.g. `core` or an AIP-style
/// number) followed by one or more kebab-case leaf segments, rendered
/// canonically as `group::leaf` (or `group::leaf::leaf` for sub-rules).
///
/// Names are globally unique within a registry, and config entries may name
/// any prefix of them: `core` matches every rule whose name starts with the
/// `core` segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleName(String);

/// Error for rule-name strings that violate the naming scheme.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid rule name `{0}`: expected `::`-joined lowercase kebab-case segments")]
pub struct InvalidRuleName(String);

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('-')
        && !segment.ends_with('-')
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

impl RuleName {
    /// Build a rule name from its group and leaf segments.
    ///
    /// # Panics
    /// Panics if either segment violates the naming scheme; rule names are
    /// fixed at registration time, so an invalid one is a programming error.
    #[must_use]
    pub fn new(group: &str, leaf: &str) -> Self {
        assert!(
            valid_segment(group) && leaf.split("::").all(valid_segment),
            "invalid rule name `{group}::{leaf}`"
        );
        Self(format!("{group}::{leaf}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading (group) segment.
    #[must_use]
    pub fn group(&self) -> &str {
        self.0.split_once("::").map_or(self.0.as_str(), |(g, _)| g)
    }

    /// Whether `prefix` matches this name on whole segment boundaries:
    /// `core` prefixes `core::naming`, but `core-x` does not.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        match self.0.strip_prefix(prefix) {
            Some("") => true,
            Some(rest) => rest.starts_with("::"),
            None => false,
        }
    }
}

impl FromStr for RuleName {
    type Err = InvalidRuleName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split("::").collect();
        if segments.len() >= 2 && segments.iter().all(|segment| valid_segment(segment)) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidRuleName(s.to_string()))
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RuleName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_rendering() {
        let name = RuleName::new("core", "field-lower-snake-case");
        assert_eq!(name.as_str(), "core::field-lower-snake-case");
        assert_eq!(name.group(), "core");
    }

    #[test]
    fn test_sub_rule_segments() {
        let name = RuleName::new("0123", "resource::pattern");
        assert_eq!(name.as_str(), "0123::resource::pattern");
        assert_eq!(name.group(), "0123");
    }

    #[test]
    fn test_prefix_matches_on_segment_boundaries() {
        let name: RuleName = "core::naming::messages".parse().unwrap();
        assert!(name.has_prefix("core"));
        assert!(name.has_prefix("core::naming"));
        assert!(name.has_prefix("core::naming::messages"));
        assert!(!name.has_prefix("core::nam"));
        assert!(!name.has_prefix("cor"));
        assert!(!name.has_prefix("core::naming::messages::extra"));
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        assert!("".parse::<RuleName>().is_err());
        assert!("core".parse::<RuleName>().is_err());
        assert!("Core::naming".parse::<RuleName>().is_err());
        assert!("core::".parse::<RuleName>().is_err());
        assert!("core::-naming".parse::<RuleName>().is_err());
        assert!("core::snake_case".parse::<RuleName>().is_err());
    }

    #[test]
    #[should_panic(expected = "invalid rule name")]
    fn test_new_panics_on_invalid_segment() {
        let _ = RuleName::new("core", "Not Kebab");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a: RuleName = "0131::request-name".parse().unwrap();
        let b: RuleName = "core::naming".parse().unwrap();
        assert!(a < b);
    }
}
