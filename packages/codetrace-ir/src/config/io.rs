//! Configuration I/O
//!
//! YAML schema types. Loading and export live on `AnalyzerConfig`.

use super::analyzer_config::{LayoutConfig, TraceConfig};
use serde::{Deserialize, Serialize};

/// Schema versions this build reads
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
}
