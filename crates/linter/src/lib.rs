//! Pluggable lint engine for protobuf API descriptors.
//!
//! The engine walks each file's immutable descriptor tree, decides per rule
//! and per node whether the rule is active (ordered config blocks plus
//! inline disable comments), dispatches active rules, stamps every reported
//! [`Problem`] with a source span from the positional side table, and
//! returns one deterministic [`Response`] per input file.
//!
//! Rules are collaborators, not part of the engine: any number of
//! independently packaged [`Rule`] providers register into a shared
//! [`RuleRegistry`] before a lint run. The engine's correctness does not
//! depend on any one rule's internal logic.

mod enabled;
mod linter;
mod name;
mod problem;
mod registry;
mod rule;
pub mod rules;

pub use enabled::is_enabled;
pub use linter::{LintError, Linter};
pub use name::{InvalidRuleName, RuleName};
pub use problem::{Problem, Response};
pub use registry::{RegistryError, RuleRegistry};
pub use rule::{Rule, RuleError};

/// Prelude module for convenient imports.
///
/// Re-exports the types needed to implement and register rules:
///
/// ```rust,ignore
/// use protolint_linter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::name::RuleName;
    pub use crate::problem::{Problem, Response};
    pub use crate::registry::RuleRegistry;
    pub use crate::rule::{Rule, RuleError};
    pub use protolint_descriptor::{Descriptor, DescriptorKind};
}
