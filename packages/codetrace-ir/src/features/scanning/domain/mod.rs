//! Scanning domain models

mod parsed_tree;
mod scanned;
mod syntax_node;

pub use parsed_tree::{ParseError, ParsedTree};
pub use scanned::{ScannedDocument, ScannedUnit};
pub use syntax_node::{SyntaxKind, SyntaxNode};
