//! End-to-end tests for the lint engine.
//!
//! These exercise the full path: build a descriptor fixture with recorded
//! source info, register rules, layer config blocks, lint, and inspect the
//! aggregated responses.

use protolint_config::{from_yaml_str, ConfigBlock};
use protolint_descriptor::{
    Comments, Descriptor, DescriptorId, DescriptorKind, FileBuilder, FileDescriptor, SourceSpan,
};
use protolint_linter::{LintError, Linter, Problem, Response, Rule, RuleError, RuleName, RuleRegistry};
use std::sync::Arc;

/// A library-shaped fixture: one message with two fields and a nested enum,
/// plus a service, with spans recorded for the message and its fields.
fn library_file(path: &str) -> FileDescriptor {
    let mut builder = FileBuilder::new(path, "library.v1");
    let book = builder.add_message(DescriptorId::FILE, "Book").unwrap();
    let name = builder.add_field(book, "displayName", 1).unwrap();
    let pages = builder.add_field(book, "page_count", 2).unwrap();
    let format = builder.add_enum(book, "Format").unwrap();
    builder
        .add_enum_value(format, "FORMAT_UNSPECIFIED", 0)
        .unwrap();
    builder.add_enum_value(format, "paperback", 1).unwrap();
    let service = builder.add_service(DescriptorId::FILE, "Library").unwrap();
    builder.add_method(service, "GetBook").unwrap();

    builder
        .record_span(book, SourceSpan::on_line(3, 1, 20))
        .unwrap();
    builder
        .record_span(name, SourceSpan::on_line(4, 3, 28))
        .unwrap();
    builder
        .record_span(pages, SourceSpan::on_line(5, 3, 25))
        .unwrap();
    builder.build()
}

fn core_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry
        .register_all("core", protolint_linter::rules::core_rules())
        .unwrap();
    registry
}

fn problems_for<'a>(response: &'a Response, rule: &str) -> Vec<&'a Problem> {
    response
        .problems
        .iter()
        .filter(|p| p.rule().map(RuleName::as_str) == Some(rule))
        .collect()
}

#[test]
fn test_core_rules_find_expected_problems() {
    let linter = Linter::new(core_registry(), Vec::new());
    let responses = linter.lint(&[library_file("library/v1/book.proto")]).unwrap();
    assert_eq!(responses.len(), 1);

    let response = &responses[0];
    let field_problems = problems_for(response, "core::field-lower-snake-case");
    assert_eq!(field_problems.len(), 1);
    assert_eq!(field_problems[0].descriptor_name(), "library.v1.Book.displayName");
    assert_eq!(field_problems[0].suggestion.as_deref(), Some("display_name"));

    let value_problems = problems_for(response, "core::enum-value-upper-snake-case");
    assert_eq!(value_problems.len(), 1);
    assert_eq!(value_problems[0].suggestion.as_deref(), Some("PAPERBACK"));

    // The package is declared, so package-defined stays quiet.
    assert!(problems_for(response, "core::package-defined").is_empty());
}

#[test]
fn test_locations_are_auto_filled_from_side_table() {
    let linter = Linter::new(core_registry(), Vec::new());
    let file = library_file("library/v1/book.proto");
    let responses = linter.lint(std::slice::from_ref(&file)).unwrap();

    let field_problems = problems_for(&responses[0], "core::field-lower-snake-case");
    // Same span as locating the descriptor directly.
    assert_eq!(field_problems[0].location(), Some(SourceSpan::on_line(4, 3, 28)));

    // The enum value has no recorded span; it resolves to the sentinel, not
    // an error.
    let value_problems = problems_for(&responses[0], "core::enum-value-upper-snake-case");
    assert_eq!(value_problems[0].location(), Some(SourceSpan::UNKNOWN));
}

#[test]
fn test_config_cascade_last_match_wins_end_to_end() {
    let yaml = r"
- rules:
    core::field-lower-snake-case: { disabled: true }
- rules:
    core::field-lower-snake-case: { disabled: false }
";
    let configs = from_yaml_str(yaml).unwrap();
    let linter = Linter::new(core_registry(), configs);
    let responses = linter.lint(&[library_file("a.proto")]).unwrap();
    assert_eq!(problems_for(&responses[0], "core::field-lower-snake-case").len(), 1);

    let reversed = r"
- rules:
    core::field-lower-snake-case: { disabled: false }
- rules:
    core::field-lower-snake-case: { disabled: true }
";
    let linter = Linter::new(core_registry(), from_yaml_str(reversed).unwrap());
    let responses = linter.lint(&[library_file("a.proto")]).unwrap();
    assert!(problems_for(&responses[0], "core::field-lower-snake-case").is_empty());
}

#[test]
fn test_group_disable_with_leaf_reenable_in_one_block() {
    let yaml = r"
- rules:
    core: { disabled: true }
    core::enum-value-upper-snake-case: { disabled: false }
";
    let linter = Linter::new(core_registry(), from_yaml_str(yaml).unwrap());
    let responses = linter.lint(&[library_file("a.proto")]).unwrap();

    let response = &responses[0];
    assert!(problems_for(response, "core::field-lower-snake-case").is_empty());
    assert_eq!(problems_for(response, "core::enum-value-upper-snake-case").len(), 1);
}

#[test]
fn test_path_scoped_block_only_affects_matching_files() {
    let yaml = r"
- included_paths: ['legacy/**']
  rules:
    core: { disabled: true }
";
    let linter = Linter::new(core_registry(), from_yaml_str(yaml).unwrap());
    let files = vec![
        library_file("legacy/book.proto"),
        library_file("library/v1/book.proto"),
    ];
    let responses = linter.lint(&files).unwrap();

    assert!(responses[0].problems.is_empty());
    assert!(!responses[1].problems.is_empty());
}

#[test]
fn test_inline_directive_beats_enabling_config() {
    let mut builder = FileBuilder::new("a.proto", "library.v1");
    let book = builder.add_message(DescriptorId::FILE, "Book").unwrap();
    let field = builder.add_field(book, "displayName", 1).unwrap();
    builder
        .record_comments(
            field,
            Comments {
                leading: Some("protolint: disable=core::field-lower-snake-case".to_string()),
                ..Comments::default()
            },
        )
        .unwrap();
    let file = builder.build();

    // Config explicitly enables the rule everywhere; the comment still wins.
    let configs = vec![ConfigBlock::enabling("core::field-lower-snake-case")];
    let linter = Linter::new(core_registry(), configs);
    let responses = linter.lint(&[file]).unwrap();
    assert!(problems_for(&responses[0], "core::field-lower-snake-case").is_empty());
}

#[test]
fn test_inline_directive_on_message_covers_nested_values() {
    let mut builder = FileBuilder::new("a.proto", "library.v1");
    let book = builder.add_message(DescriptorId::FILE, "Book").unwrap();
    let format = builder.add_enum(book, "Format").unwrap();
    builder.add_enum_value(format, "paperback", 1).unwrap();
    builder
        .record_comments(
            book,
            Comments {
                leading: Some("protolint: disable=all".to_string()),
                ..Comments::default()
            },
        )
        .unwrap();
    let file = builder.build();

    let linter = Linter::new(core_registry(), Vec::new());
    let responses = linter.lint(&[file]).unwrap();
    assert!(problems_for(&responses[0], "core::enum-value-upper-snake-case").is_empty());
}

#[test]
fn test_lint_is_idempotent() {
    let linter = Linter::new(core_registry(), Vec::new());
    let files = vec![
        library_file("a.proto"),
        library_file("b.proto"),
        library_file("c.proto"),
    ];

    let first = linter.lint(&files).unwrap();
    let second = linter.lint(&files).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.file_path, b.file_path);
        assert_eq!(a.problems, b.problems);
    }
}

/// A rule that pins its problem to one element of a repeated option rather
/// than the whole declaration.
struct PinpointsOption {
    name: RuleName,
}

impl Rule for PinpointsOption {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn kinds(&self) -> &[DescriptorKind] {
        &[DescriptorKind::Message]
    }

    fn check(&self, descriptor: Descriptor<'_>) -> Result<Vec<Problem>, RuleError> {
        Ok(vec![Problem::new(descriptor, "second pattern is malformed")
            .with_location(descriptor.locate_option(&[7, 1]))])
    }
}

#[test]
fn test_rule_set_location_is_left_untouched() {
    let mut builder = FileBuilder::new("a.proto", "library.v1");
    let book = builder.add_message(DescriptorId::FILE, "Book").unwrap();
    builder
        .record_span(book, SourceSpan::on_line(3, 1, 20))
        .unwrap();
    // Span for the second element of a repeated option on the message.
    builder.record_location(
        protolint_descriptor::SourcePath::from(vec![4, 0, 7, 1]),
        protolint_descriptor::Location::new(SourceSpan::on_line(6, 5, 44)),
    );
    let file = builder.build();

    let mut registry = RuleRegistry::new();
    registry
        .register(Arc::new(PinpointsOption {
            name: "test::pinpoint".parse().unwrap(),
        }))
        .unwrap();
    let linter = Linter::new(registry, Vec::new());
    let responses = linter.lint(&[file]).unwrap();

    let problems = problems_for(&responses[0], "test::pinpoint");
    // Not the message's own span: the rule's explicit location survives.
    assert_eq!(problems[0].location(), Some(SourceSpan::on_line(6, 5, 44)));
}

/// Fails only on a configured file path.
struct FailsOnFile {
    name: RuleName,
    target: String,
}

impl Rule for FailsOnFile {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn kinds(&self) -> &[DescriptorKind] {
        &[DescriptorKind::File]
    }

    fn check(&self, descriptor: Descriptor<'_>) -> Result<Vec<Problem>, RuleError> {
        if descriptor.file().path() == self.target {
            Err(RuleError::new("exploded"))
        } else {
            Ok(Vec::new())
        }
    }
}

#[test]
fn test_broken_rule_does_not_affect_other_files_in_separate_calls() {
    let mut registry = core_registry();
    registry
        .register(Arc::new(FailsOnFile {
            name: "test::fails-on-a".parse().unwrap(),
            target: "a.proto".to_string(),
        }))
        .unwrap();
    let linter = Linter::new(registry, Vec::new());

    let err = linter.lint_file(&library_file("a.proto")).unwrap_err();
    match err {
        LintError::Rule { rule, file, .. } => {
            assert_eq!(rule.as_str(), "test::fails-on-a");
            assert_eq!(file, "a.proto");
        }
        other => panic!("unexpected error: {other}"),
    }

    // File B, linted independently, is unaffected.
    let response = linter.lint_file(&library_file("b.proto")).unwrap();
    assert!(!response.problems.is_empty());
}

#[test]
fn test_responses_serialize_for_formatters() {
    let linter = Linter::new(core_registry(), Vec::new());
    let responses = linter.lint(&[library_file("library/v1/book.proto")]).unwrap();

    let value = serde_json::to_value(&responses).unwrap();
    assert_eq!(value[0]["file_path"], "library/v1/book.proto");
    let first = &value[0]["problems"][0];
    assert!(first["message"].is_string());
    assert!(first["rule_id"].is_string());
}
