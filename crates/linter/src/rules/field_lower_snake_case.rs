use crate::name::RuleName;
use crate::problem::Problem;
use crate::rule::{Rule, RuleError};
use crate::rules::to_lower_snake_case;
use protolint_descriptor::{Descriptor, DescriptorKind};
use std::sync::LazyLock;

static NAME: LazyLock<RuleName> = LazyLock::new(|| RuleName::new("core", "field-lower-snake-case"));

/// Field names (extensions included) should use `lower_snake_case`.
pub struct FieldLowerSnakeCase;

impl Rule for FieldLowerSnakeCase {
    fn name(&self) -> &RuleName {
        &NAME
    }

    fn uri(&self) -> Option<&str> {
        Some("https://protobuf.dev/programming-guides/style/#fields")
    }

    fn kinds(&self) -> &[DescriptorKind] {
        &[DescriptorKind::Field, DescriptorKind::Extension]
    }

    fn check(&self, descriptor: Descriptor<'_>) -> Result<Vec<Problem>, RuleError> {
        let name = descriptor.name();
        let want = to_lower_snake_case(name);
        if name == want {
            return Ok(Vec::new());
        }
        Ok(vec![Problem::new(
            descriptor,
            format!("Field `{name}` should use lower_snake_case, e.g. `{want}`."),
        )
        .with_suggestion(want)])
    }
}
