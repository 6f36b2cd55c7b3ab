use eslint_suppress::violation::Violation;
use eslint_suppress::{Outcome, SuppressOptions, suppress_source};

fn run(source: &str, violations: &[Violation]) -> Outcome {
    suppress_source(source, violations, &SuppressOptions::default())
        .expect("suppress should succeed")
}

fn run_with(source: &str, violations: &[Violation], options: &SuppressOptions) -> Outcome {
    suppress_source(source, violations, options).expect("suppress should succeed")
}

fn modified_text(outcome: Outcome) -> String {
    match outcome {
        Outcome::Modified { text, .. } => text,
        other => panic!("expected Modified, got {other:?}"),
    }
}

#[test]
fn inserts_line_comment_above_the_violation() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  return a == b;\n",
        "}\n",
    );
    let result = run(source, &[Violation::error(2, "eqeqeq")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  // eslint-disable-next-line eqeqeq -- TODO: Fix this the next time the file is edited.\n",
            "  return a == b;\n",
            "}\n",
        )
    );
}

#[test]
fn no_violations_means_no_change() {
    let source = "export function foo(a, b) {\n  return a === b;\n}\n";
    assert_eq!(run(source, &[]), Outcome::Unchanged);
}

#[test]
fn merges_into_an_existing_directive_without_explanation() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  // eslint-disable-next-line eqeqeq\n",
        "  return a == b && a;\n",
        "}\n",
    );
    let result = run(source, &[Violation::error(3, "no-unused-vars")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  // eslint-disable-next-line eqeqeq, no-unused-vars\n",
            "  return a == b && a;\n",
            "}\n",
        )
    );
}

#[test]
fn merge_preserves_the_existing_explanation() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  // eslint-disable-next-line eqeqeq -- for reasons\n",
        "  return a == b && a;\n",
        "}\n",
    );
    let result = run(source, &[Violation::error(3, "no-unused-vars")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  // eslint-disable-next-line eqeqeq, no-unused-vars -- for reasons\n",
            "  return a == b && a;\n",
            "}\n",
        )
    );
}

#[test]
fn merge_that_adds_no_rules_is_unchanged() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  // eslint-disable-next-line eqeqeq\n",
        "  return a == b;\n",
        "}\n",
    );
    assert_eq!(run(source, &[Violation::error(3, "eqeqeq")]), Outcome::Unchanged);
}

#[test]
fn custom_message_replaces_the_default_explanation() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  return a == b;\n",
        "}\n",
    );
    let options = SuppressOptions {
        rules: Vec::new(),
        message: Some("Legacy violation, see JIRA-123".to_string()),
    };
    let result = run_with(source, &[Violation::error(2, "eqeqeq")], &options);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  // eslint-disable-next-line eqeqeq -- Legacy violation, see JIRA-123\n",
            "  return a == b;\n",
            "}\n",
        )
    );
}

#[test]
fn rule_whitelist_limits_which_violations_are_suppressed() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  return a == b;\n",
        "  console.log('hi');\n",
        "}\n",
    );
    let options = SuppressOptions {
        rules: vec!["no-unreachable".to_string()],
        message: None,
    };
    let violations = [
        Violation::error(2, "eqeqeq"),
        Violation::error(3, "no-unreachable"),
    ];
    let result = run_with(source, &violations, &options);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  return a == b;\n",
            "  // eslint-disable-next-line no-unreachable -- TODO: Fix this the next time the file is edited.\n",
            "  console.log('hi');\n",
            "}\n",
        )
    );
}

#[test]
fn multiline_statement_anchors_at_its_first_line() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  if (a) {\n",
        "    return fn(\n",
        "      a,\n",
        "      b\n",
        "    );\n",
        "  }\n",
        "}\n",
    );
    let result = run(source, &[Violation::error(4, "consistent-return")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  if (a) {\n",
            "    // eslint-disable-next-line consistent-return -- TODO: Fix this the next time the file is edited.\n",
            "    return fn(\n",
            "      a,\n",
            "      b\n",
            "    );\n",
            "  }\n",
            "}\n",
        )
    );
}

#[test]
fn warnings_are_never_suppressed() {
    let source = "export function foo(a, b) {\n  console.log(a, b);\n}\n";
    let result = run(source, &[Violation::warning(2, "no-console")]);
    assert_eq!(result, Outcome::Unchanged);
}

#[test]
fn unparseable_source_is_reported_as_a_parse_failure() {
    let result = run("not actually javascript", &[Violation::error(1, "eqeqeq")]);
    assert_eq!(result, Outcome::ParseFailed);
}

#[test]
fn violation_on_the_first_line_inserts_at_file_start() {
    let source = "export const foo = (a, b) => a == b;\n";
    let result = run(source, &[Violation::error(1, "import/prefer-default-export")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "// eslint-disable-next-line import/prefer-default-export -- TODO: Fix this the next time the file is edited.\n",
            "export const foo = (a, b) => a == b;\n",
        )
    );
}

#[test]
fn else_if_branch_anchors_inside_the_preceding_block() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  if (a === b) {\n",
        "    return a;\n",
        "  } else if (a == b) {\n",
        "    return b;\n",
        "  }\n",
        "}\n",
    );
    let result = run(source, &[Violation::error(4, "eqeqeq")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  if (a === b) {\n",
            "    return a;\n",
            "    // eslint-disable-next-line eqeqeq -- TODO: Fix this the next time the file is edited.\n",
            "  } else if (a == b) {\n",
            "    return b;\n",
            "  }\n",
            "}\n",
        )
    );
}

#[test]
fn else_if_branch_merges_with_the_directive_above_it() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  if (a === b) {\n",
        "    return a;\n",
        "    // eslint-disable-next-line eqeqeq\n",
        "  } else if (a == b && b) {\n",
        "    return b;\n",
        "  }\n",
        "}\n",
    );
    let result = run(source, &[Violation::error(5, "no-unused-vars")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  if (a === b) {\n",
            "    return a;\n",
            "    // eslint-disable-next-line eqeqeq, no-unused-vars\n",
            "  } else if (a == b && b) {\n",
            "    return b;\n",
            "  }\n",
            "}\n",
        )
    );
}

#[test]
fn else_if_after_an_empty_block_indents_past_the_brace() {
    let source = concat!(
        "export function foo(a, b) {\n",
        "  if (a === b) {\n",
        "  } else if (a == b) {\n",
        "    return b;\n",
        "  }\n",
        "}\n",
    );
    let result = run(source, &[Violation::error(3, "eqeqeq")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\n",
            "  if (a === b) {\n",
            "    // eslint-disable-next-line eqeqeq -- TODO: Fix this the next time the file is edited.\n",
            "  } else if (a == b) {\n",
            "    return b;\n",
            "  }\n",
            "}\n",
        )
    );
}

#[test]
fn violations_inside_template_literals_are_dropped() {
    let source = concat!(
        "const s = `\n",
        "  ${a == b}\n",
        "`;\n",
        "const t = a == b;\n",
    );
    let violations = [Violation::error(2, "eqeqeq"), Violation::error(4, "eqeqeq")];
    let result = run(source, &violations);
    assert_eq!(
        modified_text(result),
        concat!(
            "const s = `\n",
            "  ${a == b}\n",
            "`;\n",
            "// eslint-disable-next-line eqeqeq -- TODO: Fix this the next time the file is edited.\n",
            "const t = a == b;\n",
        )
    );
}

#[test]
fn two_rules_on_one_line_share_a_single_directive() {
    let source = concat!(
        "export function foo(a) {\n",
        "  return a == unknownGlobal;\n",
        "}\n",
    );
    let violations = [Violation::error(2, "eqeqeq"), Violation::error(2, "no-undef")];
    let result = run(source, &violations);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a) {\n",
            "  // eslint-disable-next-line eqeqeq, no-undef -- TODO: Fix this the next time the file is edited.\n",
            "  return a == unknownGlobal;\n",
            "}\n",
        )
    );
}

#[test]
fn crlf_files_get_crlf_directive_lines() {
    let source = "export function foo(a, b) {\r\n  return a == b;\r\n}\r\n";
    let result = run(source, &[Violation::error(2, "eqeqeq")]);
    assert_eq!(
        modified_text(result),
        concat!(
            "export function foo(a, b) {\r\n",
            "  // eslint-disable-next-line eqeqeq -- TODO: Fix this the next time the file is edited.\r\n",
            "  return a == b;\r\n",
            "}\r\n",
        )
    );
}

#[test]
fn directive_count_matches_the_edits_made() {
    let source = concat!(
        "const a = b == c;\n",
        "const d = e == f;\n",
    );
    let violations = [Violation::error(1, "eqeqeq"), Violation::error(2, "eqeqeq")];
    match run(source, &violations) {
        Outcome::Modified { directives, .. } => assert_eq!(directives, 2),
        other => panic!("expected Modified, got {other:?}"),
    }
}
