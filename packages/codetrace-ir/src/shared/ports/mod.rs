//! Ports shared across features

pub mod language;

pub use language::Language;
