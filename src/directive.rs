//! Parse and render of suppression directive comments.
//!
//! The directive grammar is fixed and bit-exact in both surface forms:
//!
//! ```text
//! // eslint-disable-next-line <rule>[, <rule>...][ -- <explanation>]
//! /* eslint-disable-next-line <rule>[, <rule>...][ -- <explanation>] */
//! ```
//!
//! JSX children cannot hold a bare comment, so the block form is additionally
//! wrapped in an expression container: `{/* ... */}`. Merging is defined in
//! terms of this grammar rather than ad hoc text matching so that it can be
//! tested independently of the tree walk.

use itertools::Itertools;

/// Marker shared by every directive comment.
pub const MARKER: &str = "eslint-disable-next-line";

/// Explanation used when the caller supplies none.
pub const DEFAULT_EXPLANATION: &str = "TODO: Fix this the next time the file is edited.";

const SEPARATOR: &str = " -- ";

/// Surface form of a directive comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentForm {
    /// `// eslint-disable-next-line ...`
    Line,
    /// `/* eslint-disable-next-line ... */`
    Block,
    /// `{/* eslint-disable-next-line ... */}`, legal among JSX children.
    Wrapped,
}

/// The content of one suppression comment: rule list plus optional rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub rule_ids: Vec<String>,
    pub explanation: Option<String>,
}

impl Directive {
    pub fn new(rule_ids: Vec<String>, explanation: Option<String>) -> Self {
        Self {
            rule_ids,
            explanation,
        }
    }

    /// Append rule ids not already present, keeping existing order.
    /// Returns how many ids were added. Never drops an existing rule and the
    /// explanation is left untouched: human-authored rationale always wins.
    pub fn merge(&mut self, rule_ids: &[String]) -> usize {
        let mut added = 0;
        for rule in rule_ids {
            if !self.rule_ids.contains(rule) {
                self.rule_ids.push(rule.clone());
                added += 1;
            }
        }
        added
    }

    /// Render the directive in the given surface form.
    pub fn render(&self, form: CommentForm) -> String {
        let mut body = format!("{MARKER} {}", self.rule_ids.iter().join(", "));
        if let Some(explanation) = &self.explanation {
            body.push_str(SEPARATOR);
            body.push_str(explanation);
        }
        match form {
            CommentForm::Line => format!("// {body}"),
            CommentForm::Block => format!("/* {body} */"),
            CommentForm::Wrapped => format!("{{/* {body} */}}"),
        }
    }

    /// Parse a directive-shaped comment. `text` must be a single trimmed line.
    ///
    /// Returns `None` for anything that is not a suppression directive with at
    /// least one rule id, including ordinary comments.
    pub fn parse(text: &str) -> Option<(Self, CommentForm)> {
        let trimmed = text.trim();
        let (body, form) = if let Some(rest) = trimmed.strip_prefix("//") {
            (rest, CommentForm::Line)
        } else if let Some(rest) = trimmed.strip_prefix("{/*") {
            (rest.strip_suffix("*/}")?, CommentForm::Wrapped)
        } else if let Some(rest) = trimmed.strip_prefix("/*") {
            (rest.strip_suffix("*/")?, CommentForm::Block)
        } else {
            return None;
        };

        let body = body.trim().strip_prefix(MARKER)?.strip_prefix(' ')?;
        let (rules_part, explanation) = match body.find(SEPARATOR) {
            Some(at) => (
                &body[..at],
                Some(body[at + SEPARATOR.len()..].to_string()),
            ),
            None => (body, None),
        };

        let rule_ids: Vec<String> = rules_part
            .split(',')
            .map(|rule| rule.trim().to_string())
            .filter(|rule| !rule.is_empty())
            .collect();
        if rule_ids.is_empty() {
            return None;
        }

        Some((Self { rule_ids, explanation }, form))
    }
}
