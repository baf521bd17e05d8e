use std::collections::HashMap;

use crate::node::Translations;

/// Translations trees keyed by locale code.
///
/// Holds the primary tier (rooted under the namespace segment, e.g. `js`) and
/// an optional `extras` tier with the same shape that is searched with the
/// caller's scope as-is.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    // e.g. translations["en"]["js"]["topic"]["title"] = "Topic"
    //      translations["fr"]["js"]["topic"]["title"] = "Sujet"
    translations: HashMap<String, Translations>,
    extras: HashMap<String, Translations>,
}

impl LocaleTable {
    pub fn new() -> Self {
        LocaleTable::default()
    }

    pub fn with_translations(&mut self, locale: &str, translations: Translations) -> &mut Self {
        self.translations.insert(locale.to_owned(), translations);
        self
    }

    pub fn with_extras(&mut self, locale: &str, extras: Translations) -> &mut Self {
        self.extras.insert(locale.to_owned(), extras);
        self
    }

    pub fn translations(&self, locale: &str) -> Option<&Translations> {
        self.translations.get(locale)
    }

    pub fn extras(&self, locale: &str) -> Option<&Translations> {
        self.extras.get(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty() && self.extras.is_empty()
    }
}
