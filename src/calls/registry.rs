//! Extension to dialect lookup.

use super::CallCounts;
use super::classifier::count_calls_into;
use super::dialect::{Dialect, DialectRules};
use crate::config::Config;
use std::collections::{BTreeMap, HashMap};

/// Resolves file extensions to dialect rules.
///
/// Built once per run and shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    extensions: HashMap<String, Dialect>,
    rules: HashMap<Dialect, DialectRules>,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl DialectRegistry {
    /// Build a registry from explicit extension and keyword maps.
    pub fn new(
        extensions: &BTreeMap<String, Dialect>,
        extra_keywords: &BTreeMap<Dialect, Vec<String>>,
    ) -> Self {
        let rules = Dialect::ALL
            .iter()
            .map(|&dialect| {
                let extra = extra_keywords.get(&dialect).into_iter().flatten();
                (dialect, DialectRules::with_extra_keywords(dialect, extra))
            })
            .collect();

        Self {
            extensions: extensions
                .iter()
                .map(|(ext, dialect)| (ext.clone(), *dialect))
                .collect(),
            rules,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.extensions, &config.extra_keywords)
    }

    /// Dialect registered for `extension`, falling back to its lowercase form.
    pub fn dialect_for(&self, extension: &str) -> Option<Dialect> {
        self.extensions
            .get(extension)
            .or_else(|| self.extensions.get(&extension.to_lowercase()))
            .copied()
    }

    pub fn rules_for(&self, extension: &str) -> Option<&DialectRules> {
        self.dialect_for(extension)
            .and_then(|dialect| self.rules.get(&dialect))
    }

    /// Count call sites in `code` as the dialect registered for `extension`.
    ///
    /// Returns `false` (and leaves `counts` untouched) when no dialect is
    /// registered.
    pub fn count_calls_into(&self, code: &str, extension: &str, counts: &mut CallCounts) -> bool {
        match self.rules_for(extension) {
            Some(rules) => {
                count_calls_into(code, rules, counts);
                true
            }
            None => false,
        }
    }
}
