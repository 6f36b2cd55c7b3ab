//! Anchor resolution: where a suppression directive attaches.
//!
//! A `eslint-disable-next-line` comment only acts on the line directly below
//! it, so the directive always becomes a brand-new line above the anchored
//! row. Resolution decides three things: which row that is (usually the
//! violation's own row, sometimes the first line of the enclosing statement),
//! which comment surface form is legal at that position (a line comment in
//! plain-statement and attribute contexts, an expression-wrapped block comment
//! among JSX children), and the exact indentation to use. Positions where no
//! legal comment line can be inserted (the middle of a template literal, for
//! example) are reported as unanchorable and the violation is dropped rather
//! than risking a corrupt edit.

use tree_sitter::{Node, Point, Tree};

use crate::edit::LineIndex;

/// Syntactic context of an anchor, which dictates the comment surface form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    /// Plain statement or declaration; line comment above the statement.
    StatementLine,
    /// Among a JSX element's children; wrapped block comment sibling.
    MarkupChild,
    /// A JSX attribute or its value expression; line comment above it.
    MarkupAttribute,
    /// Before a JSX closing tag, as the element's last child position.
    ClosingEdge,
}

/// A resolved insertion point for one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// 0-based row the directive line is inserted above.
    pub row: usize,
    pub kind: ContextKind,
    /// Exact indentation for the directive line.
    pub indent: String,
}

/// Resolve the anchor for a violation reported on 1-based `line`.
///
/// Returns `None` when the line has no legal insertion point; the caller
/// drops that violation and continues with the rest.
pub fn resolve_anchor(tree: &Tree, source: &str, lines: &LineIndex, line: usize) -> Option<Anchor> {
    if line == 0 {
        return None;
    }
    let row = line - 1;
    if row >= lines.line_count() {
        return None;
    }

    let root = tree.root_node();
    let first = match first_named_on_row(root, row) {
        Some(node) => node,
        None => covering_node(root, source, lines, row)?,
    };

    // The node that owns the line boundary above `row`. Inserting a line
    // inside a literal or a comment would change its value.
    let container = spanning_ancestor(first, row);
    if let Some(container) = container {
        if matches!(
            container.kind(),
            "string" | "template_string" | "regex" | "comment"
        ) {
            return None;
        }
    }

    if first.kind() == "jsx_closing_element" {
        return Some(Anchor {
            row,
            kind: ContextKind::ClosingEdge,
            indent: closing_edge_indent(first, source, lines, row),
        });
    }

    if let Some(container) = container {
        if matches!(container.kind(), "jsx_element" | "jsx_fragment") {
            return Some(Anchor {
                row,
                kind: ContextKind::MarkupChild,
                indent: lines.indent(source, row).to_string(),
            });
        }
    }

    if first.kind() == "else_clause" {
        return Some(else_branch_anchor(first, source, lines));
    }

    if first.kind() == "jsx_attribute" || container.is_some_and(is_attribute_context) {
        return Some(Anchor {
            row,
            kind: ContextKind::MarkupAttribute,
            indent: lines.indent(source, row).to_string(),
        });
    }

    // Plain statement context: climb to the enclosing statement, redirecting
    // when the walk crosses an `else` (the comment must land before the
    // `else if` keyword, never inside its test) or a markup boundary.
    let mut node = first;
    loop {
        if node.kind() == "else_clause" {
            return Some(else_branch_anchor(node, source, lines));
        }
        let parent = node.parent()?;
        if is_statement_boundary(parent.kind()) {
            let stmt_row = node.start_position().row;
            return Some(Anchor {
                row: stmt_row,
                kind: ContextKind::StatementLine,
                indent: lines.indent(source, stmt_row).to_string(),
            });
        }
        if matches!(parent.kind(), "jsx_element" | "jsx_fragment") {
            let child_row = node.start_position().row;
            return Some(Anchor {
                row: child_row,
                kind: ContextKind::MarkupChild,
                indent: lines.indent(source, child_row).to_string(),
            });
        }
        if parent.kind() == "jsx_attribute" {
            let attr_row = parent.start_position().row;
            return Some(Anchor {
                row: attr_row,
                kind: ContextKind::MarkupAttribute,
                indent: lines.indent(source, attr_row).to_string(),
            });
        }
        node = parent;
    }
}

/// First named, non-extra node in document order whose span starts on `row`.
fn first_named_on_row(node: Node<'_>, row: usize) -> Option<Node<'_>> {
    if node.start_position().row > row || node.end_position().row < row {
        return None;
    }
    if node.is_named()
        && !node.is_extra()
        && node.parent().is_some()
        && node.start_position().row == row
    {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_named_on_row(child, row) {
            return Some(found);
        }
    }
    None
}

/// Smallest named node covering the first non-blank column of `row`; used for
/// continuation lines where nothing starts on the row itself.
fn covering_node<'t>(
    root: Node<'t>,
    source: &str,
    lines: &LineIndex,
    row: usize,
) -> Option<Node<'t>> {
    let text = lines.line_text(source, row);
    let column = text.len() - text.trim_start().len();
    let point = Point { row, column };
    let node = root.named_descendant_for_point_range(point, point)?;
    if node.is_extra() {
        return None;
    }
    Some(node)
}

/// Nearest ancestor-or-self whose span starts on an earlier row: the node the
/// new line would be inserted into.
fn spanning_ancestor(node: Node<'_>, row: usize) -> Option<Node<'_>> {
    let mut cur = Some(node);
    while let Some(n) = cur {
        if n.start_position().row < row {
            return Some(n);
        }
        cur = n.parent();
    }
    None
}

fn is_attribute_context(container: Node<'_>) -> bool {
    match container.kind() {
        // Between attributes of an opening tag, JS-style comments are legal.
        "jsx_opening_element" | "jsx_self_closing_element" => true,
        // Inside an attribute's `{...}` value expression.
        "jsx_expression" => container
            .parent()
            .is_some_and(|p| p.kind() == "jsx_attribute"),
        _ => false,
    }
}

fn is_statement_boundary(kind: &str) -> bool {
    matches!(
        kind,
        "program" | "statement_block" | "switch_case" | "switch_default" | "class_body"
    )
}

/// Anchor for a violation attributed to an `else` / `else if` branch. The
/// directive goes on the line above the `else` keyword; when that row opens
/// with the consequent's closing brace, the comment belongs inside that block
/// and takes its interior indentation (or one level deeper than the brace for
/// an empty block).
fn else_branch_anchor(else_clause: Node<'_>, source: &str, lines: &LineIndex) -> Anchor {
    let row = else_clause.start_position().row;
    let text = lines.line_text(source, row);
    if !text.trim_start().starts_with('}') {
        return Anchor {
            row,
            kind: ContextKind::StatementLine,
            indent: lines.indent(source, row).to_string(),
        };
    }

    let block_row = else_clause
        .parent()
        .and_then(|stmt| stmt.child_by_field_name("consequence"))
        .map(|block| block.start_position().row);
    let indent = match block_row {
        Some(start) => interior_indent(source, lines, start, row),
        None => format!("{}  ", lines.indent(source, row)),
    };
    Anchor {
        row,
        kind: ContextKind::StatementLine,
        indent,
    }
}

fn closing_edge_indent(closing: Node<'_>, source: &str, lines: &LineIndex, row: usize) -> String {
    let open_row = closing
        .parent()
        .map(|element| element.start_position().row)
        .unwrap_or(row);
    interior_indent(source, lines, open_row, row)
}

/// Indentation of the last non-blank line strictly between two rows, falling
/// back to one two-space level below the end row.
fn interior_indent(source: &str, lines: &LineIndex, start_row: usize, end_row: usize) -> String {
    for row in (start_row + 1..end_row).rev() {
        if !lines.line_text(source, row).trim().is_empty() {
            return lines.indent(source, row).to_string();
        }
    }
    format!("{}  ", lines.indent(source, end_row))
}
