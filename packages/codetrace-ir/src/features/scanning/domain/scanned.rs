//! Scanned document and its analyzable units

use super::parsed_tree::ParsedTree;
use super::syntax_node::SyntaxNode;

/// Source text plus the syntax tree when a real parser produced one
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    source: String,
    tree: Option<ParsedTree>,
}

/// One analyzable unit, visited in source order
#[derive(Debug, Clone, Copy)]
pub struct ScannedUnit<'a> {
    /// Zero-based source line the unit starts on
    pub line: usize,
    pub text: &'a str,
    /// Syntax node for tree-based documents
    pub syntax: Option<&'a SyntaxNode>,
    /// Enclosing syntax node; `None` for line units
    pub parent: Option<&'a SyntaxNode>,
}

impl ScannedDocument {
    /// Document split into source lines
    pub fn lines(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            tree: None,
        }
    }

    /// Document backed by a syntax tree
    pub fn parsed(source: impl Into<String>, tree: ParsedTree) -> Self {
        Self {
            source: source.into(),
            tree: Some(tree),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> Option<&ParsedTree> {
        self.tree.as_ref()
    }

    /// Units in source order: pre-order descendants of the root, or lines
    pub fn units(&self) -> Vec<ScannedUnit<'_>> {
        match &self.tree {
            Some(tree) => tree
                .root
                .descendants_with_parent()
                .into_iter()
                .map(|(node, parent)| ScannedUnit {
                    line: node.line(),
                    text: node.text(),
                    syntax: Some(node),
                    parent: Some(parent),
                })
                .collect(),
            None => self
                .source
                .lines()
                .enumerate()
                .map(|(line, text)| ScannedUnit {
                    line,
                    text,
                    syntax: None,
                    parent: None,
                })
                .collect(),
        }
    }
}
