use crate::name::RuleName;
use crate::rule::Rule;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("rule `{0}` is already registered")]
    Duplicate(RuleName),
    #[error("rule `{name}` does not belong to group `{group}`")]
    GroupMismatch { name: RuleName, group: String },
}

/// Collision-free catalog of all registered rules, keyed by name.
///
/// Registration happens once at process start and fails fast on a duplicate
/// name; that is a programming error, not a runtime condition. After
/// registration the registry is read-only; `all()` iterates in name order,
/// so enumeration is deterministic across calls and across runs.
#[derive(Default)]
pub struct RuleRegistry {
    rules: BTreeMap<RuleName, Arc<dyn Rule>>,
}

impl RuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one rule. Fails if a rule with the same name already exists;
    /// the registry is left unchanged in that case.
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<(), RegistryError> {
        match self.rules.entry(rule.name().clone()) {
            Entry::Occupied(entry) => Err(RegistryError::Duplicate(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(rule);
                Ok(())
            }
        }
    }

    /// Bulk registration for one rule group.
    ///
    /// Each rule must carry `group` as its name prefix. Rules are inserted
    /// in order with the same collision semantics as [`RuleRegistry::register`];
    /// on the first failure, rules already inserted stay registered. This is
    /// a plain insert-then-check loop, not a transaction.
    pub fn register_all(
        &mut self,
        group: &str,
        rules: Vec<Arc<dyn Rule>>,
    ) -> Result<(), RegistryError> {
        for rule in rules {
            if !rule.name().has_prefix(group) {
                return Err(RegistryError::GroupMismatch {
                    name: rule.name().clone(),
                    group: group.to_string(),
                });
            }
            self.register(rule)?;
        }
        Ok(())
    }

    /// Every registered rule, in name order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.values()
    }

    #[must_use]
    pub fn get(&self, name: &RuleName) -> Option<&Arc<dyn Rule>> {
        self.rules.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
