//! Error types for codetrace-ir
//!
//! Errors only travel between internal stages. The public `analyze` entry
//! points swallow them into the canonical empty result.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for analyzer operations
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Parse error (real-parser drivers only)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Language tag with no registered driver
    #[error("Unsupported language '{0}'. Supported: javascript, java, cpp, python")]
    UnsupportedLanguage(String),

    /// Scanner could not be set up for the language
    #[error("Scan error: {0}")]
    Scan(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalyzerError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        AnalyzerError::Parse(msg.into())
    }

    /// Create a scan error
    pub fn scan(msg: impl Into<String>) -> Self {
        AnalyzerError::Scan(msg.into())
    }
}

/// Result type alias for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;
