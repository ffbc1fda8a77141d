use crate::enabled::is_enabled;
use crate::name::RuleName;
use crate::problem::{Problem, Response};
use crate::registry::RuleRegistry;
use crate::rule::RuleError;
use protolint_config::{ConfigBlock, ConfigError};
use protolint_descriptor::{walk, FileDescriptor, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LintError {
    /// A rule callback (or the walk feeding it) failed. The findings the
    /// rule emitted before failing may be incomplete, so the whole run
    /// fails rather than passing off a partial result as clean.
    #[error("rule `{rule}` failed on `{file}`: {source}")]
    Rule {
        rule: RuleName,
        file: String,
        #[source]
        source: RuleError,
    },
    #[error("configuration error while linting `{file}`")]
    Config {
        file: String,
        #[source]
        source: ConfigError,
    },
}

/// The orchestrator: dispatches every registered, enabled rule against
/// every matching node of each input file and aggregates the findings.
///
/// The registry and config blocks are read-only for the lifetime of a
/// `lint` call, so concurrent per-file workers share them by reference.
#[derive(Debug)]
pub struct Linter {
    registry: RuleRegistry,
    configs: Vec<ConfigBlock>,
}

impl Linter {
    #[must_use]
    pub fn new(registry: RuleRegistry, configs: Vec<ConfigBlock>) -> Self {
        Self { registry, configs }
    }

    /// Lint a batch of files, producing one [`Response`] per input file in
    /// input order. Files are independent; with more than one input the
    /// per-file work fans out across scoped threads and rejoins in order.
    #[tracing::instrument(skip(self, files), fields(files = files.len(), rules = self.registry.len()))]
    pub fn lint(&self, files: &[FileDescriptor]) -> Result<Vec<Response>, LintError> {
        match files {
            [] => Ok(Vec::new()),
            [file] => Ok(vec![self.lint_file(file)?]),
            _ => std::thread::scope(|scope| {
                let handles: Vec<_> = files
                    .iter()
                    .map(|file| scope.spawn(move || self.lint_file(file)))
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                    })
                    .collect()
            }),
        }
    }

    /// Lint one file against every registered rule.
    #[tracing::instrument(skip(self, file), fields(path = file.path()))]
    pub fn lint_file(&self, file: &FileDescriptor) -> Result<Response, LintError> {
        let mut problems = Vec::new();

        for rule in self.registry.all() {
            let rule_name = rule.name();
            if rule.kinds().is_empty() {
                tracing::trace!(rule = %rule_name, "Rule declares no kind affinity, skipping");
                continue;
            }

            let found_before = problems.len();
            walk(file.root(), &mut |descriptor| {
                if !rule.kinds().contains(&descriptor.kind()) {
                    return Ok(());
                }
                let enabled = is_enabled(&self.configs, rule_name, file.path(), descriptor)
                    .map_err(|source| LintError::Config {
                        file: file.path().to_string(),
                        source,
                    })?;
                if !enabled {
                    tracing::trace!(
                        rule = %rule_name,
                        descriptor = descriptor.full_name(),
                        "Rule disabled for node, skipping"
                    );
                    return Ok(());
                }
                let found = rule.check(descriptor).map_err(|source| LintError::Rule {
                    rule: rule_name.clone(),
                    file: file.path().to_string(),
                    source,
                })?;
                for mut problem in found {
                    problem.stamp_rule(rule_name.clone());
                    if problem.location().is_none() {
                        problem.fill_location(locate(file, &problem));
                    }
                    problems.push(problem);
                }
                Ok(())
            })?;

            if problems.len() > found_before {
                tracing::debug!(
                    rule = %rule_name,
                    problems = problems.len() - found_before,
                    "Rule found problems"
                );
            }
        }

        tracing::debug!(total_problems = problems.len(), "File linting complete");
        Ok(Response {
            file_path: file.path().to_string(),
            problems,
        })
    }
}

/// Resolve the span for a problem's own descriptor. An id the file does not
/// know (or a file parsed without positional metadata) yields the unknown
/// sentinel rather than an error.
fn locate(file: &FileDescriptor, problem: &Problem) -> SourceSpan {
    file.get(problem.descriptor_id())
        .map_or(SourceSpan::UNKNOWN, protolint_descriptor::Descriptor::locate)
}
