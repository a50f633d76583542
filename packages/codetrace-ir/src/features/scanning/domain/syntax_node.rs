//! Language-neutral syntax node representation
//!
//! An owned copy of the parser's tree, so recognizers never touch
//! tree-sitter lifetimes. Nodes share one copy of the source and keep
//! only their byte range into it.

use std::ops::Range;
use std::sync::Arc;

use crate::shared::models::Span;

/// Syntax node kind (language-neutral)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxKind {
    // Definitions
    FunctionDef,
    ClassDef,

    // Declarations
    VariableDecl,
    FieldDecl,

    // Statements
    AssignmentStmt,
    ForStmt,
    ForInStmt,
    WhileStmt,

    // Expressions
    CallExpr,
    NewExpr,
    NameExpr,
    AttributeExpr,
    LiteralExpr,
    StringLiteral,
    TemplateString,
    ArrayLiteral,
    DictLiteral,
    ArgumentList,

    // Other
    Block,
    Comment,

    // Unknown/Other
    Other(String),
}

/// Language-neutral syntax node
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub span: Span,
    source: Arc<str>,
    range: Range<usize>,
    /// Field name in the parent (`name`, `value`, `body`, ...)
    pub field: Option<&'static str>,
    /// Named node (false for punctuation and keywords)
    pub is_named: bool,
    pub children: Vec<SyntaxNode>,

    /// Original tree-sitter kind
    pub raw_kind: String,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Self {
            kind,
            span,
            source: Arc::from(""),
            range: 0..0,
            field: None,
            is_named: true,
            children: Vec::new(),
            raw_kind: String::new(),
        }
    }

    #[cfg(test)]
    pub fn with_text(mut self, text: &str) -> Self {
        self.range = 0..text.len();
        self.source = Arc::from(text);
        self
    }

    /// Point the node at `range` of a shared source
    pub fn with_source(mut self, source: &Arc<str>, range: Range<usize>) -> Self {
        self.source = Arc::clone(source);
        self.range = range;
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_raw_kind(mut self, raw_kind: impl Into<String>) -> Self {
        self.raw_kind = raw_kind.into();
        self
    }

    pub fn with_field(mut self, field: Option<&'static str>) -> Self {
        self.field = field;
        self
    }

    pub fn named(mut self, is_named: bool) -> Self {
        self.is_named = is_named;
        self
    }

    /// Source text covered by the node
    pub fn text(&self) -> &str {
        self.source.get(self.range.clone()).unwrap_or("")
    }

    /// Zero-based line the node starts on
    pub fn line(&self) -> usize {
        self.span.line_index()
    }

    /// Child stored under a grammar field name
    pub fn child_by_field(&self, field: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.field == Some(field))
    }

    pub fn named_children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(|c| c.is_named && c.kind != SyntaxKind::Comment)
    }

    /// Pre-order traversal of all descendants (self excluded)
    pub fn descendants(&self) -> Vec<&SyntaxNode> {
        self.descendants_with_parent().into_iter().map(|(node, _)| node).collect()
    }

    /// Pre-order descendants, each paired with its parent
    pub fn descendants_with_parent(&self) -> Vec<(&SyntaxNode, &SyntaxNode)> {
        let mut out = Vec::new();
        let mut stack: Vec<(&SyntaxNode, &SyntaxNode)> =
            self.children.iter().rev().map(|c| (c, self)).collect();
        while let Some((node, parent)) = stack.pop() {
            out.push((node, parent));
            stack.extend(node.children.iter().rev().map(|c| (c, node)));
        }
        out
    }

    /// Identifier text when the node is a bare name
    pub fn as_identifier(&self) -> Option<&str> {
        (self.kind == SyntaxKind::NameExpr).then_some(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: SyntaxKind, text: &str) -> SyntaxNode {
        SyntaxNode::new(kind, Span::zero()).with_text(text)
    }

    #[test]
    fn test_descendants_are_pre_order() {
        let tree = SyntaxNode::new(SyntaxKind::Block, Span::zero()).with_children(vec![
            SyntaxNode::new(SyntaxKind::CallExpr, Span::zero())
                .with_text("f(1)")
                .with_children(vec![leaf(SyntaxKind::NameExpr, "f"), leaf(SyntaxKind::LiteralExpr, "1")]),
            leaf(SyntaxKind::NameExpr, "x"),
        ]);

        let texts: Vec<&str> = tree.descendants().iter().map(|n| n.text()).collect();
        assert_eq!(texts, vec!["f(1)", "f", "1", "x"]);
    }

    #[test]
    fn test_child_by_field() {
        let node = SyntaxNode::new(SyntaxKind::VariableDecl, Span::zero()).with_children(vec![
            leaf(SyntaxKind::NameExpr, "x").with_field(Some("name")),
            leaf(SyntaxKind::LiteralExpr, "5").with_field(Some("value")),
        ]);
        assert_eq!(node.child_by_field("value").map(|n| n.text()), Some("5"));
        assert_eq!(node.child_by_field("name").and_then(|n| n.as_identifier()), Some("x"));
        assert!(node.child_by_field("body").is_none());
    }

    #[test]
    fn test_shared_source_ranges() {
        let source: Arc<str> = Arc::from("let x = 5;");
        let node = SyntaxNode::new(SyntaxKind::VariableDecl, Span::zero())
            .with_source(&source, 4..9)
            .with_children(vec![
                SyntaxNode::new(SyntaxKind::NameExpr, Span::zero()).with_source(&source, 4..5),
            ]);
        assert_eq!(node.text(), "x = 5");
        assert_eq!(node.children[0].text(), "x");

        let pairs = node.descendants_with_parent();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1.text(), "x = 5");
    }
}
