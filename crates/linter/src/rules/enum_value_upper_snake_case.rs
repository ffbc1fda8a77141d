use crate::name::RuleName;
use crate::problem::Problem;
use crate::rule::{Rule, RuleError};
use crate::rules::to_upper_snake_case;
use protolint_descriptor::{Descriptor, DescriptorKind};
use std::sync::LazyLock;

static NAME: LazyLock<RuleName> =
    LazyLock::new(|| RuleName::new("core", "enum-value-upper-snake-case"));

/// Enum value names should use `UPPER_SNAKE_CASE`.
pub struct EnumValueUpperSnakeCase;

impl Rule for EnumValueUpperSnakeCase {
    fn name(&self) -> &RuleName {
        &NAME
    }

    fn uri(&self) -> Option<&str> {
        Some("https://protobuf.dev/programming-guides/style/#enums")
    }

    fn kinds(&self) -> &[DescriptorKind] {
        &[DescriptorKind::EnumValue]
    }

    fn check(&self, descriptor: Descriptor<'_>) -> Result<Vec<Problem>, RuleError> {
        let name = descriptor.name();
        let want = to_upper_snake_case(name);
        if name == want {
            return Ok(Vec::new());
        }
        Ok(vec![Problem::new(
            descriptor,
            format!("Enum value `{name}` should use UPPER_SNAKE_CASE, e.g. `{want}`."),
        )
        .with_suggestion(want)])
    }
}
