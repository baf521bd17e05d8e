use std::collections::HashMap;
use std::sync::Arc;

use crate::options::TranslateOptions;
use crate::translator::Translator;

/// A precompiled message that needs more than `{{name}}` substitution,
/// e.g. ICU MessageFormat selects.
///
/// An `Err` carries the text shown to the user in place of the message.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, options: &TranslateOptions) -> Result<String, String>;
}

impl<F> MessageFormatter for F
where
    F: Fn(&TranslateOptions) -> Result<String, String> + Send + Sync,
{
    fn format(&self, options: &TranslateOptions) -> Result<String, String> {
        self(options)
    }
}

/// Compiled message formatters keyed by message name.
#[derive(Clone, Default)]
pub struct CompiledMessages {
    formatters: HashMap<String, Arc<dyn MessageFormatter>>,
}

impl CompiledMessages {
    pub fn new() -> Self {
        CompiledMessages::default()
    }

    pub fn with_formatter(
        &mut self,
        key: &str,
        formatter: impl MessageFormatter + 'static,
    ) -> &mut Self {
        self.formatters.insert(key.to_owned(), Arc::new(formatter));
        self
    }

    pub fn get(&self, key: &str) -> Option<&dyn MessageFormatter> {
        self.formatters.get(key).map(|formatter| &**formatter)
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

impl std::fmt::Debug for CompiledMessages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledMessages")
            .field("keys", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Translator {
    /// Run the compiled formatter registered under `key`.
    ///
    /// A formatter error is returned as the message text; an unknown key
    /// gives `Missing Key: <key>`.
    pub fn message_format(&self, key: &str, options: &TranslateOptions) -> String {
        match self.messages().get(key) {
            Some(formatter) => formatter.format(options).unwrap_or_else(|e| {
                tracing::debug!("Message format '{}' failed: {}", key, e);
                e
            }),
            None => format!("Missing Key: {}", key),
        }
    }
}
