//! Parsed tree representation

use super::syntax_node::SyntaxNode;
use crate::shared::models::Span;

/// Parsed syntax tree
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// Root node of the tree
    pub root: SyntaxNode,

    /// Language
    pub language: String,

    /// Whether parsing had errors
    pub has_errors: bool,

    /// Parse errors (if any)
    pub errors: Vec<ParseError>,
}

/// Parse error
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParsedTree {
    pub fn new(root: SyntaxNode, language: impl Into<String>) -> Self {
        Self {
            root,
            language: language.into(),
            has_errors: false,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ParseError>) -> Self {
        self.has_errors = !errors.is_empty();
        self.errors = errors;
        self
    }

    /// First error rendered for logs
    pub fn error_summary(&self) -> Option<String> {
        self.errors.first().map(|e| {
            format!(
                "{} at line {}, column {} ({} error(s) total)",
                e.message,
                e.span.start_line,
                e.span.start_col,
                self.errors.len()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scanning::domain::SyntaxKind;

    #[test]
    fn test_error_summary() {
        let root = SyntaxNode::new(SyntaxKind::Block, Span::zero());
        let tree = ParsedTree::new(root, "javascript").with_errors(vec![ParseError {
            message: "Unexpected ERROR".into(),
            span: Span::new(2, 4, 2, 5),
        }]);

        assert!(tree.has_errors);
        assert_eq!(
            tree.error_summary().as_deref(),
            Some("Unexpected ERROR at line 2, column 4 (1 error(s) total)")
        );
    }
}
