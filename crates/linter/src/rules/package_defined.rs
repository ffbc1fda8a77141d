use crate::name::RuleName;
use crate::problem::Problem;
use crate::rule::{Rule, RuleError};
use protolint_descriptor::{Descriptor, DescriptorKind};
use std::sync::LazyLock;

static NAME: LazyLock<RuleName> = LazyLock::new(|| RuleName::new("core", "package-defined"));

/// Every file should declare a package.
pub struct PackageDefined;

impl Rule for PackageDefined {
    fn name(&self) -> &RuleName {
        &NAME
    }

    fn uri(&self) -> Option<&str> {
        Some("https://protobuf.dev/programming-guides/style/#packages")
    }

    fn kinds(&self) -> &[DescriptorKind] {
        &[DescriptorKind::File]
    }

    fn check(&self, descriptor: Descriptor<'_>) -> Result<Vec<Problem>, RuleError> {
        if descriptor.file().package().is_empty() {
            Ok(vec![Problem::new(
                descriptor,
                "File does not declare a package.",
            )])
        } else {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protolint_descriptor::FileBuilder;

    #[test]
    fn test_flags_missing_package() {
        let file = FileBuilder::new("test.proto", "").build();
        let problems = PackageDefined.check(file.root()).unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].suggestion.is_none());
    }

    #[test]
    fn test_accepts_declared_package() {
        let file = FileBuilder::new("test.proto", "test.v1").build();
        assert!(PackageDefined.check(file.root()).unwrap().is_empty());
    }
}
