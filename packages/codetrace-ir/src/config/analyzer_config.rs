//! Analyzer configuration
//!
//! ```rust,ignore
//! let config = AnalyzerConfig::default()
//!     .trace(|t| t.strict_parse(false))
//!     .layout(|l| l.spacing(120));
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, SUPPORTED_VERSIONS};
use super::validation::Validatable;

fn default_loop_placeholder() -> String {
    "Initialized".to_string()
}

fn default_true() -> bool {
    true
}

/// Trace construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Value bound to a loop variable without a recognizable initializer
    #[serde(default = "default_loop_placeholder")]
    pub loop_placeholder: String,

    /// Treat a syntax tree with ERROR/MISSING nodes as a parse failure
    #[serde(default = "default_true")]
    pub strict_parse: bool,

    /// Synthesize list/tree stand-in nodes for node records
    #[serde(default = "default_true")]
    pub stand_in_shapes: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            loop_placeholder: default_loop_placeholder(),
            strict_parse: true,
            stand_in_shapes: true,
        }
    }
}

impl TraceConfig {
    pub fn loop_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.loop_placeholder = placeholder.into();
        self
    }

    pub fn strict_parse(mut self, strict: bool) -> Self {
        self.strict_parse = strict;
        self
    }

    pub fn stand_in_shapes(mut self, enabled: bool) -> Self {
        self.stand_in_shapes = enabled;
        self
    }
}

impl Validatable for TraceConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.loop_placeholder.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{}.loop_placeholder must not be empty",
                self.config_name()
            )));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "trace"
    }
}

/// Node placement settings
///
/// Stand-in shapes are placed on the same grid: the tree root sits at
/// `2 * spacing`, the dictionary root half a cell further right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Distance between neighbouring nodes (1..=1000)
    pub spacing: i32,

    /// y of the first row (0..=10000)
    pub row_y: i32,

    /// x of call-frame nodes and list stand-ins (0..=10000)
    pub call_x: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 100,
            row_y: 50,
            call_x: 50,
        }
    }
}

impl LayoutConfig {
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn row_y(mut self, row_y: i32) -> Self {
        self.row_y = row_y;
        self
    }

    pub fn call_x(mut self, call_x: i32) -> Self {
        self.call_x = call_x;
        self
    }
}

impl Validatable for LayoutConfig {
    fn validate(&self) -> ConfigResult<()> {
        let checks = [
            ("spacing", self.spacing, 1..=1000, "distance between neighbouring nodes"),
            ("row_y", self.row_y, 0..=10000, "vertical offset of the first row"),
            ("call_x", self.call_x, 0..=10000, "horizontal offset of the first call frame"),
        ];
        for (field, value, bounds, hint) in checks {
            if !bounds.contains(&value) {
                return Err(ConfigError::out_of_range(
                    format!("{}.{}", self.config_name(), field),
                    value,
                    bounds,
                    hint,
                ));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "layout"
    }
}

/// Complete analyzer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub trace: TraceConfig,
    pub layout: LayoutConfig,
}

impl AnalyzerConfig {
    pub fn trace<F>(mut self, f: F) -> Self
    where
        F: FnOnce(TraceConfig) -> TraceConfig,
    {
        self.trace = f(self.trace);
        self
    }

    pub fn layout<F>(mut self, f: F) -> Self
    where
        F: FnOnce(LayoutConfig) -> LayoutConfig,
    {
        self.layout = f(self.layout);
        self
    }

    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from YAML text; missing sections keep their defaults
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        if !SUPPORTED_VERSIONS.contains(&export.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: export.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            trace: export.trace.unwrap_or_default(),
            layout: export.layout.unwrap_or_default(),
        };
        config.validate()?;
        tracing::debug!(section = config.config_name(), version = export.version, "config loaded");
        Ok(config)
    }

    /// Export as YAML schema v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: 1,
            trace: Some(self.trace.clone()),
            layout: Some(self.layout),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

impl Validatable for AnalyzerConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.trace.validate()?;
        self.layout.validate()
    }

    fn config_name(&self) -> &'static str {
        "analyzer"
    }
}
