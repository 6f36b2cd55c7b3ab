//! JavaScript/JSX parsing via tree-sitter.
//!
//! This is the "parse" half of the tree service; the "print" half is the
//! byte-offset edit application in [`crate::edit`], which reproduces every
//! untouched byte of the input exactly.

use anyhow::{Context, Result};
use tree_sitter::{Language, Parser, Tree};

fn javascript_language() -> Language {
    tree_sitter_javascript::language()
}

/// Parse source text with the JavaScript grammar (JSX included).
pub fn parse_source(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(javascript_language())
        .context("failed to load JavaScript grammar")?;

    parser
        .parse(source, None)
        .context("tree-sitter failed to parse source")
}

/// Whether the tree contains ERROR or missing nodes.
///
/// A tree with errors is never edited: a misplaced directive in a file we did
/// not fully understand could change behavior, and the caller treats the file
/// as skipped.
pub fn has_syntax_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}
