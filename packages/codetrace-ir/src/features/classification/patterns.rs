//! Container shape patterns
//!
//! Keyword matchers over type/variable names. Language-specific patterns are
//! checked before the generic ones, higher priority first.

use lazy_static::lazy_static;

use crate::shared::models::StructureTag;
use crate::shared::ports::Language;

/// Keyword matcher over a normalized name
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    pub keywords: Vec<&'static str>,
    pub tag: StructureTag,
    /// Only consulted for this language
    pub language: Option<Language>,
    pub priority: i32,
    pub exact_match: bool,
}

impl KeywordPattern {
    pub fn new(keywords: Vec<&'static str>, tag: StructureTag) -> Self {
        Self {
            keywords,
            tag,
            language: None,
            priority: 0,
            exact_match: false,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn exact(mut self) -> Self {
        self.exact_match = true;
        self
    }

    pub fn for_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// `normalized` is lowercased with `_` removed, so `circular_queue`
    /// matches `circularqueue`
    fn matches(&self, normalized: &str, language: Language) -> Option<StructureTag> {
        if self.language.is_some_and(|only| only != language) {
            return None;
        }
        let hit = self.keywords.iter().any(|keyword| {
            if self.exact_match {
                normalized == *keyword
            } else {
                normalized.contains(keyword)
            }
        });
        hit.then(|| self.tag.clone())
    }
}

/// Built-in patterns, language-specific first, then by priority
fn default_patterns() -> Vec<KeywordPattern> {
    let mut patterns = vec![
        KeywordPattern::new(vec!["circularqueue", "ringbuffer"], StructureTag::CircularQueue)
            .with_priority(10),
        KeywordPattern::new(vec!["queue", "deque"], StructureTag::Queue).with_priority(5),
        KeywordPattern::new(vec!["stack"], StructureTag::Stack).with_priority(5),
        // queue.LifoQueue is a stack despite its name
        KeywordPattern::new(vec!["lifoqueue"], StructureTag::Stack)
            .exact()
            .for_language(Language::Python),
    ];
    patterns.sort_by_key(|p| (p.language.is_none(), -p.priority));
    patterns
}

lazy_static! {
    static ref DEFAULT_PATTERNS: Vec<KeywordPattern> = default_patterns();
}

/// Match a name against the built-in container patterns
pub fn container_shape(name: &str, language: Language) -> Option<StructureTag> {
    let normalized = name.to_lowercase().replace('_', "");
    DEFAULT_PATTERNS
        .iter()
        .find_map(|pattern| pattern.matches(&normalized, language))
}
