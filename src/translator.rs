use std::borrow::Cow;
use std::sync::Arc;

use crate::context::{DEFAULT_LOCALE, TranslationContext};
use crate::error::{I18nError, I18nResult};
use crate::message_format::CompiledMessages;
use crate::node::{Resolved, TranslationNode};
use crate::options::{TranslateOptions, count_text};
use crate::plural::PluralRuleTable;
use crate::scope::{SEPARATOR, Scope};
use crate::store::LocaleTable;
use crate::template::Template;

/// Resolves scopes against a [`LocaleTable`].
///
/// A translator is immutable once built. Every call to [`Translator::translate`]
/// depends only on the table, the plural rules, the context and its arguments.
#[derive(Debug, Clone)]
pub struct Translator {
    table: Arc<LocaleTable>,
    rules: PluralRuleTable,
    context: TranslationContext,
    messages: CompiledMessages,
}

impl Translator {
    pub fn new(table: Arc<LocaleTable>) -> Self {
        Translator {
            table,
            rules: PluralRuleTable::new(),
            context: TranslationContext::new(),
            messages: CompiledMessages::new(),
        }
    }

    pub fn with_context(mut self, context: TranslationContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_plural_rules(mut self, rules: PluralRuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_messages(mut self, messages: CompiledMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn context(&self) -> &TranslationContext {
        &self.context
    }

    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    pub fn plural_rules(&self) -> &PluralRuleTable {
        &self.rules
    }

    pub(crate) fn messages(&self) -> &CompiledMessages {
        &self.messages
    }

    pub fn current_locale(&self) -> &str {
        self.context.current_locale()
    }

    /// Shorthand for [`Translator::translate`].
    pub fn t(&self, scope: impl Into<Scope>, options: &TranslateOptions) -> String {
        self.translate(&scope.into(), options)
    }

    /// Resolve `scope` to a finished string.
    ///
    /// Never fails: a scope that cannot be resolved in any locale of the
    /// fallback chain gives `[<locale>.<scope>]`.
    pub fn translate(&self, scope: &Scope, options: &TranslateOptions) -> String {
        let locale = self.selected_locale(options);
        let fallbacks = !self.context.no_fallbacks();

        // While probing with fallbacks on, a missing plural form is a miss
        // rather than a diagnostic, so the next locale gets a chance.
        let mut translation = self.find_translation(locale, scope, options, fallbacks);

        if fallbacks {
            let current = self.context.current_locale();
            let default = self.context.default_locale();
            if translation.is_none() {
                if let Some(fallback) = self.context.fallback_locale() {
                    translation = self.find_translation(fallback, scope, options, true);
                    self.log_fallback(&translation, scope, fallback, locale);
                }
            }
            if translation.is_none() && current != default {
                translation = self.find_translation(default, scope, options, false);
                self.log_fallback(&translation, scope, default, locale);
            }
            if translation.is_none() && current != DEFAULT_LOCALE {
                translation = self.find_translation(DEFAULT_LOCALE, scope, options, false);
                self.log_fallback(&translation, scope, DEFAULT_LOCALE, locale);
            }
        }

        let result = match translation {
            Some(translation) => self.interpolate(&translation, options, scope),
            None => Err(I18nError::NotATemplate(scope.to_path())),
        };
        match result {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Missing translation for '{}' in '{}': {}", scope, locale, e);
                self.missing_translation(locale, scope, None)
            }
        }
    }

    /// Find the node for `scope` in the selected locale, without fallbacks
    /// or pluralization.
    pub fn lookup<'a>(
        &'a self,
        scope: &Scope,
        options: &'a TranslateOptions,
    ) -> Option<Resolved<'a>> {
        self.lookup_in(self.selected_locale(options), scope, options)
    }

    fn lookup_in<'a>(
        &'a self,
        locale: &str,
        scope: &Scope,
        options: &'a TranslateOptions,
    ) -> Option<Resolved<'a>> {
        let prefix = options.scope.as_deref();
        let path = scope.normalize(prefix, self.context.root_namespace());
        let found = self
            .table
            .translations(locale)
            .and_then(|tree| tree.walk(path.split(SEPARATOR)));
        if found.is_some() {
            return found;
        }

        // The extras tier is not rooted under the namespace segment.
        let original = scope.with_prefix(prefix);
        let found = self
            .table
            .extras(locale)
            .and_then(|tree| tree.walk(original.split(SEPARATOR)));
        if found.is_some() {
            return found;
        }

        options
            .default_value
            .as_deref()
            .map(|default| Resolved::Text(Cow::Borrowed(default)))
    }

    fn find_translation<'a>(
        &'a self,
        locale: &str,
        scope: &Scope,
        options: &'a TranslateOptions,
        ignore_missing: bool,
    ) -> Option<Resolved<'a>> {
        let translation = self.lookup_in(locale, scope, options)?;
        match options.count {
            Some(count) => {
                self.pluralize_in(locale, translation, scope, options, count, ignore_missing)
            }
            None => Some(translation),
        }
    }

    /// Select the plural form of `translation` for `options.count`.
    ///
    /// Text passes through unchanged, as does everything when no count is
    /// set. A missing form yields the missing-translation diagnostic.
    pub fn pluralize<'a>(
        &self,
        translation: Resolved<'a>,
        scope: &Scope,
        options: &TranslateOptions,
    ) -> Option<Resolved<'a>> {
        match options.count {
            Some(count) => {
                let locale = self.selected_locale(options);
                self.pluralize_in(locale, translation, scope, options, count, false)
            }
            None => Some(translation),
        }
    }

    fn pluralize_in<'a>(
        &self,
        locale: &str,
        translation: Resolved<'a>,
        scope: &Scope,
        options: &TranslateOptions,
        count: f64,
        ignore_missing: bool,
    ) -> Option<Resolved<'a>> {
        let node = match translation {
            Resolved::Node(node) => node,
            text => return Some(text),
        };

        let tags = self.rules.rule_for(locale).categories(count.abs());
        // An exact numeric tag such as "0" wins over the rule's category.
        let exact = count_text(count);
        let found = std::iter::once(exact.as_str())
            .chain(tags.iter().map(String::as_str))
            .find_map(|tag| plural_form(node, tag));

        match found {
            Some(form) => Some(Resolved::Text(Cow::Borrowed(form))),
            None if ignore_missing => None,
            None => {
                let diagnostic = self.missing_translation(
                    self.selected_locale(options),
                    scope,
                    tags.first().map(String::as_str),
                );
                Some(Resolved::Text(Cow::Owned(diagnostic)))
            }
        }
    }

    /// Substitute placeholders in a resolved template.
    ///
    /// Fails with [`I18nError::NotATemplate`] when `translation` is a branch or
    /// an unselected plural map.
    pub fn interpolate(
        &self,
        translation: &Resolved<'_>,
        options: &TranslateOptions,
        scope: &Scope,
    ) -> I18nResult<String> {
        match translation {
            Resolved::Text(text) => Ok(Template::parse(text).interpolate(options)),
            Resolved::Node(_) => Err(I18nError::NotATemplate(scope.to_path())),
        }
    }

    /// `[<locale>.<scope>]`, or `[<locale>.<scope>.<tag>]` for a missing plural form.
    pub fn missing_translation(&self, locale: &str, scope: &Scope, tag: Option<&str>) -> String {
        match tag {
            Some(tag) => format!("[{}{}{}{}{}]", locale, SEPARATOR, scope, SEPARATOR, tag),
            None => format!("[{}{}{}]", locale, SEPARATOR, scope),
        }
    }

    fn selected_locale<'a>(&'a self, options: &'a TranslateOptions) -> &'a str {
        options
            .locale
            .as_deref()
            .unwrap_or_else(|| self.context.current_locale())
    }

    fn log_fallback(
        &self,
        translation: &Option<Resolved<'_>>,
        scope: &Scope,
        fallback: &str,
        requested: &str,
    ) {
        if translation.is_some() {
            tracing::debug!(
                "Fallback: Using '{}' from locale '{}' (requested: '{}')",
                scope,
                fallback,
                requested
            );
        }
    }
}

/// The form for `tag` in a plural map, or in a branch used as one.
fn plural_form<'a>(node: &'a TranslationNode, tag: &str) -> Option<&'a str> {
    match node {
        TranslationNode::Plural(forms) => forms.get(tag).map(String::as_str),
        TranslationNode::Branch(branch) => match branch.get(tag) {
            Some(TranslationNode::Leaf(text)) => Some(text.as_str()),
            _ => None,
        },
        TranslationNode::Leaf(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{PluralForms, Translations};

    fn en() -> Translations {
        Translations::new().with_branch(
            "js",
            Translations::new()
                .with_leaf("greeting", "Hello, {{name}}!")
                .with_branch(
                    "topic",
                    Translations::new()
                        .with_leaf("title", "Topic")
                        .with_plural(
                            "replies",
                            PluralForms::new()
                                .with_form("one", "1 reply")
                                .with_form("other", "%{count} replies"),
                        )
                        .with_plural(
                            "likes",
                            PluralForms::new()
                                .with_form("0", "no likes yet")
                                .with_form("zero", "zero likes")
                                .with_form("other", "%{count} likes"),
                        )
                        .with_plural("only_one", PluralForms::new().with_form("one", "just one")),
                ),
        )
    }

    fn translator(context: TranslationContext) -> Translator {
        let mut table = LocaleTable::new();
        table.with_translations("en", en());
        Translator::new(Arc::new(table)).with_context(context)
    }

    #[test]
    fn test_translate_leaf() {
        let i18n = translator(TranslationContext::new());
        let options = TranslateOptions::new().with_value("name", "World");
        assert_eq!(i18n.t("greeting", &options), "Hello, World!");
        assert_eq!(i18n.t("js.greeting", &options), "Hello, World!");
        assert_eq!(i18n.t(["topic", "title"], &options), "Topic");
    }

    #[test]
    fn test_options_scope_prefix() {
        let i18n = translator(TranslationContext::new());
        let options = TranslateOptions::new().with_scope("topic");
        assert_eq!(i18n.t("title", &options), "Topic");
    }

    #[test]
    fn test_pluralize() {
        let i18n = translator(TranslationContext::new());
        assert_eq!(
            i18n.t("topic.replies", &TranslateOptions::new().with_count(1)),
            "1 reply"
        );
        assert_eq!(
            i18n.t("topic.replies", &TranslateOptions::new().with_count(5)),
            "5 replies"
        );
        assert_eq!(
            i18n.t("topic.replies", &TranslateOptions::new().with_count(-5)),
            "-5 replies"
        );
    }

    #[test]
    fn test_exact_numeric_tag_wins() {
        let i18n = translator(TranslationContext::new());
        assert_eq!(
            i18n.t("topic.likes", &TranslateOptions::new().with_count(0)),
            "no likes yet"
        );
        assert_eq!(
            i18n.t("topic.likes", &TranslateOptions::new().with_count(3)),
            "3 likes"
        );
        assert_eq!(
            i18n.t("topic.likes", &TranslateOptions::new().with_count(-0.0)),
            "no likes yet"
        );
    }

    #[test]
    fn test_missing_plural_form() {
        let i18n = translator(TranslationContext::new().with_no_fallbacks(true));
        assert_eq!(
            i18n.t("topic.only_one", &TranslateOptions::new().with_count(4)),
            "[en.topic.only_one.other]"
        );

        // With fallbacks on the probe misses, then the default locale reports it.
        let i18n = translator(TranslationContext::new().with_locale("fr"));
        assert_eq!(
            i18n.t("topic.only_one", &TranslateOptions::new().with_count(4)),
            "[fr.topic.only_one.other]"
        );
    }

    #[test]
    fn test_plural_without_count_is_missing() {
        let i18n = translator(TranslationContext::new());
        assert_eq!(
            i18n.t("topic.replies", &TranslateOptions::new()),
            "[en.topic.replies]"
        );
        assert_eq!(i18n.t("topic", &TranslateOptions::new()), "[en.topic]");
    }

    #[test]
    fn test_default_value() {
        let i18n = translator(TranslationContext::new());
        let options = TranslateOptions::new()
            .with_default_value("Fallback {{name}}")
            .with_value("name", "x");
        assert_eq!(i18n.t("nope", &options), "Fallback x");
    }

    #[test]
    fn test_missing_key() {
        let i18n = translator(TranslationContext::new());
        assert_eq!(i18n.t("nope.nothing", &TranslateOptions::new()), "[en.nope.nothing]");
        assert_eq!(
            i18n.t("nope", &TranslateOptions::new().with_locale("de")),
            "[de.nope]"
        );
    }

    #[test]
    fn test_lookup_and_pluralize() {
        let i18n = translator(TranslationContext::new());
        let options = TranslateOptions::new().with_count(2);
        let scope = Scope::from("topic.replies");
        let node = i18n.lookup(&scope, &options).unwrap();
        assert!(matches!(node, Resolved::Node(TranslationNode::Plural(_))));

        let form = i18n.pluralize(node, &scope, &options).unwrap();
        assert_eq!(form.as_text(), Some("%{count} replies"));
        assert_eq!(
            i18n.interpolate(&form, &options, &scope).unwrap(),
            "2 replies"
        );

        let node = i18n.lookup(&scope, &options).unwrap();
        assert_eq!(
            i18n.interpolate(&node, &options, &scope),
            Err(I18nError::NotATemplate("topic.replies".to_string()))
        );
    }

    #[test]
    fn test_idempotent() {
        let i18n = translator(TranslationContext::new());
        let options = TranslateOptions::new().with_count(5);
        let first = i18n.t("topic.replies", &options);
        assert_eq!(first, i18n.t("topic.replies", &options));
    }
}
