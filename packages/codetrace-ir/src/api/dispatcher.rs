//! Request dispatch by language tag

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AnalyzerConfig;
use crate::errors::{AnalyzerError, Result};
use crate::features::drivers::{create_full_registry, DriverRegistry, LanguageDriver};
use crate::shared::models::AnalysisResult;
use crate::shared::ports::Language;

/// `{code, language}` as sent by the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub code: String,
    pub language: String,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
        }
    }
}

/// Selects the language driver for a request
#[derive(Debug)]
pub struct Dispatcher {
    registry: DriverRegistry,
}

impl Dispatcher {
    /// Every language, one shared config
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_registry(create_full_registry(config))
    }

    pub fn with_registry(registry: DriverRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    pub fn languages(&self) -> Vec<Language> {
        self.registry.languages()
    }

    pub fn driver(&self, tag: &str) -> Result<&LanguageDriver> {
        self.registry
            .get_by_tag(tag)
            .ok_or_else(|| AnalyzerError::UnsupportedLanguage(tag.to_string()))
    }

    /// Analyze, surfacing unsupported tags and parse failures
    pub fn try_dispatch(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        self.driver(&request.language)?.try_analyze(&request.code)
    }

    /// Analyze; never fails
    pub fn dispatch(&self, request: &AnalysisRequest) -> AnalysisResult {
        self.analyze(&request.code, &request.language)
    }

    pub fn analyze(&self, code: &str, language: &str) -> AnalysisResult {
        match self.driver(language) {
            Ok(driver) => driver.analyze(code),
            Err(e) => {
                warn!(language, error = %e, "returning empty result");
                AnalysisResult::empty()
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

lazy_static! {
    static ref DEFAULT_DISPATCHER: Dispatcher = Dispatcher::default();
}

/// Analyze a snippet with the default configuration
///
/// Unsupported languages and unparseable input yield the canonical empty
/// result.
pub fn analyze(code: &str, language: &str) -> AnalysisResult {
    DEFAULT_DISPATCHER.analyze(code, language)
}
