//! Shared module - Common types and utilities
//!
//! Types shared by every feature: the trace data model, the language port
//! and id generation. No tree-sitter types leak in here.

pub mod models;
pub mod ports;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use ports::Language;
pub use utils::id_generator::IdGenerator;
