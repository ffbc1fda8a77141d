use crate::name::RuleName;
use protolint_config::{ConfigBlock, ConfigError};
use protolint_descriptor::Descriptor;

/// Token that introduces an inline directive inside a source comment,
/// e.g. `// protolint: disable=core::field-lower-snake-case`
/// or `// protolint: disable=all`.
const DIRECTIVE_TOKEN: &str = "protolint:";
const DISABLE_PREFIX: &str = "disable=";
const DISABLE_ALL: &str = "all";

/// Decide whether `rule` is active for one descriptor of one file.
///
/// The decision is a pure function of its inputs:
/// 1. the default state is enabled;
/// 2. config blocks are evaluated strictly in order: within a block that
///    applies to `file_path`, the most specific key matching the rule name
///    (exact name, then shorter prefixes, then the `all` wildcard) supplies
///    that block's verdict, and a later applying block overrides an earlier
///    one, like a cascade of style-sheet rules;
/// 3. an inline disable directive on the descriptor or any of its ancestors
///    (the file included) wins unconditionally over every block.
pub fn is_enabled(
    configs: &[ConfigBlock],
    rule: &RuleName,
    file_path: &str,
    descriptor: Descriptor<'_>,
) -> Result<bool, ConfigError> {
    if disabled_by_directive(rule, descriptor) {
        return Ok(false);
    }
    let mut enabled = true;
    for block in configs {
        if !block.applies_to(file_path)? {
            continue;
        }
        if let Some(disabled) = block_verdict(block, rule) {
            enabled = !disabled;
        }
    }
    Ok(enabled)
}

/// The verdict of one block for one rule: the `disabled` flag of the most
/// specific matching key, or `None` when nothing in the block matches.
/// Specificity is prefix length; the `all` wildcard is the least specific.
fn block_verdict(block: &ConfigBlock, rule: &RuleName) -> Option<bool> {
    let mut best: Option<(usize, bool)> = None;
    for (key, setting) in &block.rules {
        let specificity = if key == DISABLE_ALL {
            0
        } else if rule.has_prefix(key) {
            key.len()
        } else {
            continue;
        };
        match best {
            Some((current, _)) if current >= specificity => {}
            _ => best = Some((specificity, setting.disabled)),
        }
    }
    best.map(|(_, disabled)| disabled)
}

/// Whether the descriptor, or any ancestor up to and including the file,
/// carries a comment disabling this rule (or all rules).
fn disabled_by_directive(rule: &RuleName, descriptor: Descriptor<'_>) -> bool {
    let mut current = Some(descriptor);
    while let Some(d) = current {
        if let Some(comments) = d.comments() {
            let detached = comments.leading_detached.iter().map(String::as_str);
            if comments
                .attached()
                .chain(detached)
                .any(|text| comment_disables(text, rule))
            {
                return true;
            }
        }
        current = d.parent();
    }
    false
}

fn comment_disables(text: &str, rule: &RuleName) -> bool {
    text.lines().any(|line| {
        let Some(rest) = line.trim().strip_prefix(DIRECTIVE_TOKEN) else {
            return false;
        };
        let Some(target) = rest.trim().strip_prefix(DISABLE_PREFIX) else {
            return false;
        };
        let target = target.trim();
        target == DISABLE_ALL || rule.has_prefix(target)
    })
}
