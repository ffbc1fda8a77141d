use crate::name::RuleName;
use crate::problem::Problem;
use protolint_descriptor::{Descriptor, DescriptorKind};
use thiserror::Error;

/// Error returned by a rule callback in place of findings.
///
/// A rule that errors mid-traversal may already have emitted some but not
/// all of its findings, so the engine treats this as a hard failure for the
/// (rule, file) pair, never as "zero problems".
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RuleError(String);

impl RuleError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The contract every lint rule conforms to.
///
/// Rules are registered once at process start, shared as `Arc<dyn Rule>`,
/// and never mutated. A rule declares the descriptor kinds it wants through
/// [`Rule::kinds`]; the engine dispatches [`Rule::check`] only to nodes of
/// those kinds, so a rule never has to defend against the rest of the tree.
/// A rule with an empty kind set is never dispatched at all.
pub trait Rule: Send + Sync {
    /// Globally unique hierarchical name, e.g. `core::field-lower-snake-case`.
    fn name(&self) -> &RuleName;

    /// Documentation URI for the convention this rule enforces.
    fn uri(&self) -> Option<&str> {
        None
    }

    /// Descriptor kinds this rule applies to.
    fn kinds(&self) -> &[DescriptorKind];

    /// Inspect one descriptor of a declared kind and report violations.
    ///
    /// Locations may be left unset (the engine resolves them from the
    /// descriptor) or pinned explicitly via `Descriptor::locate_option` for
    /// sub-element precision.
    fn check(&self, descriptor: Descriptor<'_>) -> Result<Vec<Problem>, RuleError>;
}
