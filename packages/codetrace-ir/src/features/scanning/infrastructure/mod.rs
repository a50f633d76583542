//! Scanner infrastructure

mod tree_sitter_scanner;

pub use tree_sitter_scanner::{TreeSitterGrammar, TreeSitterScanner};
