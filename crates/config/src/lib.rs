//! Layered, path-scoped rule configuration.
//!
//! A lint run is configured by an ordered list of [`ConfigBlock`]s. Each
//! block scopes itself to a set of file paths with shell-style globs and
//! carries per-rule (or per-rule-group) enable/disable settings. Later
//! blocks override earlier ones for any path/rule pair both match; the
//! cascade itself is resolved by the linter crate.

mod config;
mod loader;

pub use config::{ConfigBlock, ConfigError, RuleSetting};
pub use loader::{from_file, from_json_str, from_yaml_str};

pub type Result<T> = std::result::Result<T, ConfigError>;
