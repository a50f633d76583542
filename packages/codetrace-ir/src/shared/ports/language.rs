//! Language abstraction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported source languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Java,
    Cpp,
    Python,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::JavaScript,
        Language::Java,
        Language::Cpp,
        Language::Python,
    ];

    /// Request tag for this language
    pub fn name(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Python => "python",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::Java => &["java"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "h", "c"],
            Language::Python => &["py", "pyi"],
        }
    }

    /// Parse a request tag ("javascript", "java", "cpp", "python")
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "javascript" | "js" => Some(Language::JavaScript),
            "java" => Some(Language::Java),
            "cpp" | "c++" | "c" => Some(Language::Cpp),
            "python" | "py" => Some(Language::Python),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    pub fn from_file_path(path: &str) -> Option<Self> {
        let (_, ext) = path.rsplit_once('.')?;
        Self::from_extension(ext)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Language::from_tag("javascript"), Some(Language::JavaScript));
        assert_eq!(Language::from_tag("CPP"), Some(Language::Cpp));
        assert_eq!(Language::from_tag("ruby"), None);
    }

    #[test]
    fn test_from_file_path() {
        assert_eq!(Language::from_file_path("src/Main.java"), Some(Language::Java));
        assert_eq!(Language::from_file_path("list.hpp"), Some(Language::Cpp));
        assert_eq!(Language::from_file_path("script.py"), Some(Language::Python));
        assert_eq!(Language::from_file_path("README"), None);
    }

    #[test]
    fn test_tag_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_tag(lang.name()), Some(lang));
        }
    }
}
