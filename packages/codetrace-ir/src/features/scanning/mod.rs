//! Scanning Feature
//!
//! Splits source into analyzable units: source lines for pattern drivers,
//! pre-order syntax nodes for real-parser drivers.
//!
//! ## Structure
//! - `domain/` - SyntaxNode, ParsedTree, ScannedDocument/ScannedUnit
//! - `infrastructure/` - TreeSitterScanner (the only place tree-sitter is used)

pub mod domain;
pub mod infrastructure;

pub use domain::{ParseError, ParsedTree, ScannedDocument, ScannedUnit, SyntaxKind, SyntaxNode};
pub use infrastructure::{TreeSitterGrammar, TreeSitterScanner};
