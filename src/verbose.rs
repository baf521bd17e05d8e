use std::collections::HashMap;
use std::sync::Mutex;

use crate::options::TranslateOptions;
use crate::scope::Scope;
use crate::translator::Translator;

/// Receives one line per newly seen scope.
pub type DiagnosticSink = Box<dyn Fn(&str) + Send + Sync>;

/// Debug wrapper that tags every translation with a per-scope id.
///
/// The first time a scope is translated it gets the next id, starting at 1,
/// and a line `Translation #<id>: <scope>` (plus the options as JSON, if any)
/// goes to the sink. Results come back as `<text> (#<id>)`. Fallbacks are
/// disabled so missing keys show up as diagnostics for the requested locale.
pub struct VerboseTranslator {
    translator: Translator,
    sink: DiagnosticSink,
    ids: Mutex<HashMap<String, usize>>,
}

impl VerboseTranslator {
    /// Wrap `translator`, logging through `tracing`.
    pub fn new(translator: Translator) -> Self {
        Self::with_sink(translator, |line: &str| tracing::info!("{}", line))
    }

    pub fn with_sink(translator: Translator, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        let context = translator.context().clone().with_no_fallbacks(true);
        VerboseTranslator {
            translator: translator.with_context(context),
            sink: Box::new(sink),
            ids: Mutex::new(HashMap::new()),
        }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn t(&self, scope: impl Into<Scope>, options: &TranslateOptions) -> String {
        self.translate(&scope.into(), options)
    }

    pub fn translate(&self, scope: &Scope, options: &TranslateOptions) -> String {
        let id = self.id_for(scope, options);
        format!("{} (#{})", self.translator.translate(scope, options), id)
    }

    fn id_for(&self, scope: &Scope, options: &TranslateOptions) -> usize {
        let key = scope.to_path();
        let id = {
            let mut ids = self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(id) = ids.get(&key) {
                return *id;
            }
            let id = ids.len() + 1;
            ids.insert(key.clone(), id);
            id
        };

        let mut line = format!("Translation #{}: {}", id, key);
        if !options.is_empty() {
            match serde_json::to_string(options) {
                Ok(json) => line.push_str(&format!(", parameters: {}", json)),
                Err(e) => tracing::debug!("Could not serialize options for '{}': {}", key, e),
            }
        }
        (self.sink)(&line);
        id
    }
}

/// Compose verbose logging over `translator`; the original is consumed.
pub fn with_verbose_logging(
    translator: Translator,
    sink: impl Fn(&str) + Send + Sync + 'static,
) -> VerboseTranslator {
    VerboseTranslator::with_sink(translator, sink)
}
