use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed glob pattern `{pattern}`")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("failed to read config file `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config `{path}`: {message}")]
    Invalid { path: PathBuf, message: String },
    #[error("unsupported config format: `{0}` (expected .yaml, .yml, or .json)")]
    UnsupportedFormat(PathBuf),
}

/// Setting for one rule name or rule-group prefix within a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetting {
    #[serde(default)]
    pub disabled: bool,
}

impl RuleSetting {
    #[must_use]
    pub const fn disabled() -> Self {
        Self { disabled: true }
    }

    #[must_use]
    pub const fn enabled() -> Self {
        Self { disabled: false }
    }
}

/// One path-scoped set of rule directives.
///
/// The block applies to a file when the file's project-relative path matches
/// at least one of `included_paths` (all paths, when empty) and none of
/// `excluded_paths`. Keys of `rules` are rule names or group prefixes, e.g.
/// `core::field-lower-snake-case` or just `core`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigBlock {
    pub included_paths: Vec<String>,
    pub excluded_paths: Vec<String>,
    pub rules: BTreeMap<String, RuleSetting>,
    /// Globs compiled on first evaluation and reused for every node
    /// afterwards. Blocks are read-only for the duration of a lint run, so
    /// the cache never goes stale mid-run.
    #[serde(skip)]
    compiled: OnceLock<CompiledPaths>,
}

#[derive(Debug)]
struct CompiledPaths {
    included: Vec<Pattern>,
    excluded: Vec<Pattern>,
}

impl Clone for ConfigBlock {
    fn clone(&self) -> Self {
        Self {
            included_paths: self.included_paths.clone(),
            excluded_paths: self.excluded_paths.clone(),
            rules: self.rules.clone(),
            compiled: OnceLock::new(),
        }
    }
}

impl PartialEq for ConfigBlock {
    fn eq(&self, other: &Self) -> bool {
        self.included_paths == other.included_paths
            && self.excluded_paths == other.excluded_paths
            && self.rules == other.rules
    }
}

impl ConfigBlock {
    /// Shorthand for a block disabling one rule (or group) everywhere.
    #[must_use]
    pub fn disabling(rule: impl Into<String>) -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(rule.into(), RuleSetting::disabled());
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Shorthand for a block enabling one rule (or group) everywhere.
    #[must_use]
    pub fn enabling(rule: impl Into<String>) -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(rule.into(), RuleSetting::enabled());
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Whether this block applies to `file_path`.
    ///
    /// Globs use shell semantics (`*`, `**`) anchored to project-relative
    /// paths. A malformed glob is surfaced as an error the first time it is
    /// evaluated; silently skipping it would risk false negatives.
    pub fn applies_to(&self, file_path: &str) -> Result<bool, ConfigError> {
        let compiled = match self.compiled.get() {
            Some(compiled) => compiled,
            None => {
                let fresh = CompiledPaths {
                    included: compile_all(&self.included_paths)?,
                    excluded: compile_all(&self.excluded_paths)?,
                };
                self.compiled.get_or_init(|| fresh)
            }
        };
        if compiled
            .excluded
            .iter()
            .any(|pattern| pattern.matches(file_path))
        {
            return Ok(false);
        }
        if compiled.included.is_empty() {
            return Ok(true);
        }
        Ok(compiled
            .included
            .iter()
            .any(|pattern| pattern.matches(file_path)))
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| ConfigError::Glob {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
