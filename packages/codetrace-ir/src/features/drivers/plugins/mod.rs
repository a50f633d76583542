//! Language plugins
//!
//! Each language has its own recognizer implementing the Recognizer trait.
//! - JavaScript, Python: tree-sitter syntax trees
//! - Java, C++: line patterns sharing the `c_like` core

pub mod c_like;
pub mod cpp;
pub mod java;
pub mod javascript;
pub mod python;

pub use c_like::{LineRecognizer, LineRules};
pub use cpp::{CppRecognizer, CppRules};
pub use java::{JavaRecognizer, JavaRules};
pub use javascript::JavaScriptRecognizer;
pub use python::PythonRecognizer;

use super::{DriverRegistry, LanguageDriver};
use crate::config::AnalyzerConfig;
use crate::features::trace_building::Recognizer;
use crate::shared::ports::Language;

/// Recognizer for one language
pub fn create_recognizer(language: Language, config: &AnalyzerConfig) -> Box<dyn Recognizer> {
    let strict = config.trace.strict_parse;
    match language {
        Language::JavaScript => Box::new(JavaScriptRecognizer::new().strict(strict)),
        Language::Java => Box::new(JavaRecognizer::new(JavaRules)),
        Language::Cpp => Box::new(CppRecognizer::new(CppRules)),
        Language::Python => Box::new(PythonRecognizer::new().strict(strict)),
    }
}

/// Create a registry with all language drivers registered
pub fn create_full_registry(config: &AnalyzerConfig) -> DriverRegistry {
    create_registry(&Language::ALL, config)
}

/// Create a registry with only specific languages
pub fn create_registry(languages: &[Language], config: &AnalyzerConfig) -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    for &language in languages {
        registry.register(LanguageDriver::new(
            create_recognizer(language, config),
            config.clone(),
        ));
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_registry() {
        let registry = create_full_registry(&AnalyzerConfig::default());
        assert_eq!(registry.languages(), Language::ALL.to_vec());
        assert!(registry.get_by_tag("cpp").is_some());
        assert!(registry.get_by_tag("ruby").is_none());
    }

    #[test]
    fn test_partial_registry() {
        let registry = create_registry(&[Language::Java], &AnalyzerConfig::default());
        assert_eq!(registry.languages(), vec![Language::Java]);
        assert!(registry.get(Language::JavaScript).is_none());
    }
}
