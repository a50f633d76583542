//! Language driver

use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::errors::Result;
use crate::features::trace_building::{Recognizer, TraceBuilder};
use crate::shared::models::AnalysisResult;
use crate::shared::ports::Language;

/// Scanner + classifier + state tracker + trace builder for one language
pub struct LanguageDriver {
    recognizer: Box<dyn Recognizer>,
    config: AnalyzerConfig,
}

impl LanguageDriver {
    pub fn new(recognizer: Box<dyn Recognizer>, config: AnalyzerConfig) -> Self {
        Self { recognizer, config }
    }

    pub fn language(&self) -> Language {
        self.recognizer.language()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze, surfacing scan/parse failures
    pub fn try_analyze(&self, source: &str) -> Result<AnalysisResult> {
        let document = self.recognizer.scan(source)?;
        debug!(
            language = %self.language(),
            bytes = source.len(),
            "scanned document"
        );
        Ok(TraceBuilder::new(self.recognizer.as_ref(), &self.config).build(&document))
    }

    /// Analyze; any failure becomes the canonical empty result
    pub fn analyze(&self, source: &str) -> AnalysisResult {
        match self.try_analyze(source) {
            Ok(result) => result,
            Err(e) => {
                warn!(language = %self.language(), error = %e, "analysis failed, returning empty result");
                AnalysisResult::empty()
            }
        }
    }
}

impl std::fmt::Debug for LanguageDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDriver")
            .field("language", &self.language())
            .field("config", &self.config)
            .finish()
    }
}
