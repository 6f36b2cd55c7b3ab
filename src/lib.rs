//! Bulk suppression of pre-existing ESLint errors.
//!
//! Given a source file and the violations an external linter reported for it,
//! the engine inserts `eslint-disable-next-line` directive comments directly
//! above each offending line, or folds new rule ids into a directive that is
//! already there. This lets a new or stricter rule be enabled repo-wide
//! without fixing every violation first: existing violations are frozen in
//! place with a traceable marker, and nothing else in the file is touched.

pub mod anchor;
pub mod cli;
pub mod config;
pub mod directive;
pub mod edit;
pub mod error;
pub mod linter;
pub mod parser;
pub mod telemetry;
pub mod violation;

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use crate::anchor::{ContextKind, resolve_anchor};
use crate::directive::{CommentForm, DEFAULT_EXPLANATION, Directive};
use crate::edit::{LineIndex, SourceEdit, apply_edits};
use crate::linter::{LintOutcome, Linter};
use crate::violation::{Violation, group_by_line};

/// Result of one file run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Source text with directives inserted or updated.
    Modified {
        text: String,
        /// Number of directive comments inserted or rewritten.
        directives: usize,
    },
    /// Nothing to do: no qualifying violations, or all already suppressed.
    Unchanged,
    /// The file could not be parsed; callers treat this like `Unchanged`.
    ParseFailed,
}

/// Options accepted by the core entry point.
#[derive(Debug, Clone, Default)]
pub struct SuppressOptions {
    /// Only act on these rule ids; empty means every error-severity rule.
    pub rules: Vec<String>,
    /// Explanation for newly created directives. Merging into an existing
    /// directive never replaces its explanation.
    pub message: Option<String>,
}

/// Binds a linter to suppression options for repeated per-file runs.
pub struct SuppressEngine<L> {
    linter: L,
    options: SuppressOptions,
}

impl<L: Linter> SuppressEngine<L> {
    pub fn new(linter: L, options: SuppressOptions) -> Self {
        Self { linter, options }
    }

    /// Lint one file and suppress every qualifying violation.
    pub fn run(&self, path: &Path, source: &str) -> Result<Outcome> {
        match self.linter.lint(path, source)? {
            LintOutcome::ParseFailed => Ok(Outcome::ParseFailed),
            LintOutcome::Report(violations) => {
                suppress_source(source, &violations, &self.options)
            }
        }
    }
}

/// One directive staged at an anchor row, either fresh or merged into an
/// existing comment.
struct Staged {
    directive: Directive,
    form: CommentForm,
    indent: String,
    /// Span of the existing comment to rewrite; insert a new line when absent.
    existing_span: Option<(usize, usize)>,
    /// Whether this run changed the directive at all.
    dirty: bool,
}

/// Core entry point: compute the suppressed form of `source`.
///
/// Returns [`Outcome::Unchanged`] when no edit was staged, so callers can
/// distinguish a no-op from output that merely equals its input.
pub fn suppress_source(
    source: &str,
    violations: &[Violation],
    options: &SuppressOptions,
) -> Result<Outcome> {
    let groups = group_by_line(violations, &options.rules);
    if groups.is_empty() {
        return Ok(Outcome::Unchanged);
    }

    let tree = parser::parse_source(source)?;
    if parser::has_syntax_errors(&tree) {
        return Ok(Outcome::ParseFailed);
    }

    let lines = LineIndex::new(source);
    let mut staged: BTreeMap<usize, Staged> = BTreeMap::new();

    for group in &groups {
        let Some(anchor) = resolve_anchor(&tree, source, &lines, group.line) else {
            // Conservative: better to leave one violation unsuppressed than
            // to corrupt the source.
            #[cfg(feature = "telemetry")]
            tracing::debug!(line = group.line, "no legal insertion point, dropping violation");
            continue;
        };

        if let Some(entry) = staged.get_mut(&anchor.row) {
            if entry.directive.merge(&group.rule_ids) > 0 {
                entry.dirty = true;
            }
            continue;
        }

        let entry = match existing_directive(source, &lines, anchor.row) {
            Some((span, mut directive, form)) => {
                let added = directive.merge(&group.rule_ids);
                Staged {
                    directive,
                    form,
                    indent: anchor.indent.clone(),
                    existing_span: Some(span),
                    dirty: added > 0,
                }
            }
            None => {
                let explanation = options
                    .message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());
                Staged {
                    directive: Directive::new(group.rule_ids.clone(), Some(explanation)),
                    form: comment_form(anchor.kind),
                    indent: anchor.indent.clone(),
                    existing_span: None,
                    dirty: true,
                }
            }
        };
        staged.insert(anchor.row, entry);
    }

    let eol = lines.line_ending();
    let mut edits: Vec<SourceEdit> = Vec::new();
    for (row, entry) in &staged {
        if !entry.dirty {
            continue;
        }
        let rendered = entry.directive.render(entry.form);
        match entry.existing_span {
            Some((start, end)) => edits.push(SourceEdit::replace(start, end, rendered)),
            None => edits.push(SourceEdit::insert(
                lines.line_start(*row),
                format!("{}{}{}", entry.indent, rendered, eol),
            )),
        }
    }

    if edits.is_empty() {
        return Ok(Outcome::Unchanged);
    }

    let directives = edits.len();
    let text = apply_edits(source, &edits)?;
    Ok(Outcome::Modified { text, directives })
}

fn comment_form(kind: ContextKind) -> CommentForm {
    match kind {
        ContextKind::StatementLine | ContextKind::MarkupAttribute => CommentForm::Line,
        ContextKind::MarkupChild | ContextKind::ClosingEdge => CommentForm::Wrapped,
    }
}

/// A directive-shaped comment on the line immediately above the anchor row.
///
/// Anchor identity is structural (the insertion row), so the comment directly
/// above it is the only candidate for merging.
fn existing_directive(
    source: &str,
    lines: &LineIndex,
    row: usize,
) -> Option<((usize, usize), Directive, CommentForm)> {
    if row == 0 {
        return None;
    }
    let above = row - 1;
    let text = lines.line_text(source, above);
    let trimmed = text.trim_end();
    let leading = text.len() - text.trim_start().len();
    let (directive, form) = Directive::parse(trimmed)?;
    let start = lines.line_start(above) + leading;
    let end = lines.line_start(above) + trimmed.len();
    Some(((start, end), directive, form))
}
