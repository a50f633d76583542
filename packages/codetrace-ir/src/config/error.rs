//! Errors raised while loading an analyzer config

use std::fmt::Display;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric field outside its allowed bounds
    #[error("{field} = {value} is outside {bounds} ({hint})")]
    Range {
        field: String,
        value: String,
        bounds: String,
        hint: String,
    },

    #[error("config version {found} is not supported (expected one of: {})", join_versions(.supported))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn join_versions(versions: &[u32]) -> String {
    versions.iter().map(u32::to_string).collect::<Vec<_>>().join(", ")
}

impl ConfigError {
    /// `value` fell outside `bounds`; `hint` says what the field controls
    pub fn out_of_range<T: Display>(
        field: impl Into<String>,
        value: T,
        bounds: RangeInclusive<T>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            bounds: format!("{}..={}", bounds.start(), bounds.end()),
            hint: hint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_message() {
        let err = ConfigError::out_of_range("layout.spacing", 0, 1..=1000, "nodes would overlap");
        assert_eq!(
            err.to_string(),
            "layout.spacing = 0 is outside 1..=1000 (nodes would overlap)"
        );
    }

    #[test]
    fn test_unsupported_version_message() {
        let err = ConfigError::UnsupportedVersion {
            found: 3,
            supported: vec![1],
        };
        assert_eq!(
            err.to_string(),
            "config version 3 is not supported (expected one of: 1)"
        );
    }
}
