//! Analyzer configuration
//!
//! - `analyzer_config` - `AnalyzerConfig` with trace and layout sections
//! - `io` - versioned YAML schema
//! - `validation` - `Validatable` trait
//! - `error` - `ConfigError`

pub mod analyzer_config;
pub mod error;
pub mod io;
pub mod validation;

pub use analyzer_config::{AnalyzerConfig, LayoutConfig, TraceConfig};
pub use error::{ConfigError, ConfigResult};
pub use validation::Validatable;
