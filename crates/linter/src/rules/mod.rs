//! The built-in `core` rule group.
//!
//! The real rule corpus lives in independently packaged providers; these
//! rules exist to exercise the plugin contract end to end and to give a
//! fresh registry something useful out of the box.

mod enum_value_upper_snake_case;
mod field_lower_snake_case;
mod package_defined;

pub use enum_value_upper_snake_case::EnumValueUpperSnakeCase;
pub use field_lower_snake_case::FieldLowerSnakeCase;
pub use package_defined::PackageDefined;

use crate::rule::Rule;
use std::sync::Arc;

/// Every rule in the `core` group, for `RuleRegistry::register_all("core", …)`.
#[must_use]
pub fn core_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(EnumValueUpperSnakeCase),
        Arc::new(FieldLowerSnakeCase),
        Arc::new(PackageDefined),
    ]
}

/// `camelCase` / `PascalCase` / mixed input to `lower_snake_case`.
pub(crate) fn to_lower_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(c);
            prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

pub(crate) fn to_upper_snake_case(name: &str) -> String {
    to_lower_snake_case(name).to_ascii_uppercase()
}
