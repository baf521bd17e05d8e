/// Locale to use when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Namespace segment every primary lookup is rooted under.
pub const DEFAULT_ROOT_NAMESPACE: &str = "js";

/// Locale selection and fallback settings for a [`crate::Translator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationContext {
    current_locale: Option<String>,
    fallback_locale: Option<String>,
    default_locale: String,
    root_namespace: String,
    no_fallbacks: bool,
}

impl Default for TranslationContext {
    fn default() -> Self {
        TranslationContext {
            current_locale: None,
            fallback_locale: None,
            default_locale: DEFAULT_LOCALE.to_string(),
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_string(),
            no_fallbacks: false,
        }
    }
}

impl TranslationContext {
    pub fn new() -> Self {
        TranslationContext::default()
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.current_locale = Some(locale.to_owned());
        self
    }

    pub fn with_fallback_locale(mut self, locale: &str) -> Self {
        self.fallback_locale = Some(locale.to_owned());
        self
    }

    pub fn with_default_locale(mut self, locale: &str) -> Self {
        self.default_locale = locale.to_owned();
        self
    }

    pub fn with_root_namespace(mut self, root: &str) -> Self {
        self.root_namespace = root.to_owned();
        self
    }

    pub fn with_no_fallbacks(mut self, no_fallbacks: bool) -> Self {
        self.no_fallbacks = no_fallbacks;
        self
    }

    /// The current locale, or the default locale when none is set.
    pub fn current_locale(&self) -> &str {
        self.current_locale
            .as_deref()
            .unwrap_or(self.default_locale.as_str())
    }

    pub fn fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    pub fn no_fallbacks(&self) -> bool {
        self.no_fallbacks
    }
}
