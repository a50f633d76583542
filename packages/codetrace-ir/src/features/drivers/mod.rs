//! Language Drivers
//!
//! A driver is the generic trace builder wired with one language's
//! recognizer. Failures inside a driver never reach the caller: they are
//! logged and turned into the empty result.
//!
//! ## Structure
//! - `driver` - LanguageDriver
//! - `registry` - DriverRegistry
//! - `plugins/` - per-language recognizers (tree-sitter for JavaScript and
//!   Python, line patterns for Java and C++)

mod driver;
pub mod plugins;
mod registry;

pub use driver::LanguageDriver;
pub use plugins::{create_full_registry, create_registry};
pub use registry::DriverRegistry;
