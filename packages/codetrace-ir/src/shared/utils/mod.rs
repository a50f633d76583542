//! Utility modules shared across features
//!
//! - `id_generator`: deterministic node/edge ids
//! - `literal`: quote stripping and value normalization

pub mod id_generator;
pub mod literal;

pub use id_generator::IdGenerator;
