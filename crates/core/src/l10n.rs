//! Localization lookup used when rendering notification templates.
//!
//! The translation engine itself lives outside this workspace; callers plug
//! it in through [`Translator`]. The lookup key is the stored (untranslated)
//! template, and the namespace is the id of the sending application.

use std::collections::HashMap;

/// Localization collaborator.
///
/// Implementations must fall back to returning `key` unchanged when no
/// translation is known.
pub trait Translator: Send + Sync {
    fn translate(&self, namespace: &str, key: &str) -> String;
}

/// Identity translator: every template renders in its stored language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn translate(&self, _namespace: &str, key: &str) -> String {
        key.to_string()
    }
}

/// In-memory translation table, one map per namespace.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a translation, replacing any earlier one for the same key.
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        translated: impl Into<String>,
    ) {
        self.entries
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), translated.into());
    }

    /// Builder-style variant of [`Catalog::insert`].
    pub fn with(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        self.insert(namespace, key, translated);
        self
    }
}

impl Translator for Catalog {
    fn translate(&self, namespace: &str, key: &str) -> String {
        self.entries
            .get(namespace)
            .and_then(|table| table.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
