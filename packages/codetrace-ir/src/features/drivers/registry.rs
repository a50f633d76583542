//! Driver registry

use rustc_hash::FxHashMap;

use super::driver::LanguageDriver;
use crate::shared::ports::Language;

/// Drivers keyed by language
#[derive(Debug, Default)]
pub struct DriverRegistry {
    drivers: FxHashMap<Language, LanguageDriver>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver, replacing any previous one for its language
    pub fn register(&mut self, driver: LanguageDriver) {
        self.drivers.insert(driver.language(), driver);
    }

    pub fn get(&self, language: Language) -> Option<&LanguageDriver> {
        self.drivers.get(&language)
    }

    /// Get driver by request tag ("javascript", "cpp", ...)
    pub fn get_by_tag(&self, tag: &str) -> Option<&LanguageDriver> {
        self.get(Language::from_tag(tag)?)
    }

    /// Registered languages in declaration order
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|lang| self.drivers.contains_key(lang))
            .collect()
    }
}
