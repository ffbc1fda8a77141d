use crate::name::RuleName;
use protolint_descriptor::{Descriptor, DescriptorId, SourceSpan};
use serde::Serialize;

/// One reported style violation.
///
/// Rules construct problems with [`Problem::new`] and optionally attach a
/// suggestion or a pre-resolved location; the engine stamps the rule name
/// and fills the location from the positional side table when the rule left
/// it unset. Immutable once it reaches a [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    pub message: String,
    /// Suggested replacement text for the offending element, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Fully qualified name of the offending descriptor.
    #[serde(rename = "descriptor")]
    descriptor_name: String,
    #[serde(skip)]
    descriptor: DescriptorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<SourceSpan>,
    #[serde(rename = "rule_id", skip_serializing_if = "Option::is_none")]
    rule: Option<RuleName>,
}

impl Problem {
    /// A problem against `descriptor`, located at the descriptor's own span
    /// unless [`Problem::with_location`] overrides it.
    #[must_use]
    pub fn new(descriptor: Descriptor<'_>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            descriptor_name: descriptor.full_name().to_string(),
            descriptor: descriptor.id(),
            location: None,
            rule: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Pin the problem to a specific span, e.g. one element of a repeated
    /// annotation resolved via `Descriptor::locate_option`.
    #[must_use]
    pub fn with_location(mut self, span: SourceSpan) -> Self {
        self.location = Some(span);
        self
    }

    #[must_use]
    pub fn descriptor_id(&self) -> DescriptorId {
        self.descriptor
    }

    #[must_use]
    pub fn descriptor_name(&self) -> &str {
        &self.descriptor_name
    }

    #[must_use]
    pub fn location(&self) -> Option<SourceSpan> {
        self.location
    }

    /// The rule that reported this problem; always set once the problem has
    /// been through the engine.
    #[must_use]
    pub fn rule(&self) -> Option<&RuleName> {
        self.rule.as_ref()
    }

    pub(crate) fn stamp_rule(&mut self, rule: RuleName) {
        self.rule = Some(rule);
    }

    pub(crate) fn fill_location(&mut self, span: SourceSpan) {
        if self.location.is_none() {
            self.location = Some(span);
        }
    }
}

/// All problems found in one input file, in stable visit order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Response {
    pub file_path: String,
    pub problems: Vec<Problem>,
}
