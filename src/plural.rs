use std::collections::HashMap;
use std::sync::Arc;

use icu_locale::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::error::{I18nError, I18nResult};

/// Maps a number to the plural category tags to try, in order.
///
/// The translator always passes the absolute value of the count.
pub trait PluralRule: Send + Sync {
    fn categories(&self, n: f64) -> Vec<String>;
}

impl<F> PluralRule for F
where
    F: Fn(f64) -> Vec<String> + Send + Sync,
{
    fn categories(&self, n: f64) -> Vec<String> {
        self(n)
    }
}

/// The built-in rule used when a locale has no rule of its own.
///
/// `0` tries `zero`, then `none`, then `other`; `1` is `one`; anything else
/// is `other`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishRule;

impl PluralRule for EnglishRule {
    fn categories(&self, n: f64) -> Vec<String> {
        if n == 0.0 {
            vec!["zero".to_string(), "none".to_string(), "other".to_string()]
        } else if n == 1.0 {
            vec!["one".to_string()]
        } else {
            vec!["other".to_string()]
        }
    }
}

/// Cardinal CLDR rules for one locale, backed by ICU data.
///
/// Only whole numbers are categorized by CLDR operands; fractional counts
/// select `other`.
#[derive(Clone)]
pub struct CldrRule {
    locale: Locale,
    rules: Arc<PluralRules>,
}

impl CldrRule {
    pub fn try_new(locale_str: &str) -> I18nResult<Self> {
        let locale: Locale = locale_str.parse().map_err(|e| {
            I18nError::InvalidLocale(format!("Failed to parse locale '{}': {}", locale_str, e))
        })?;
        let rules = PluralRules::try_new(locale.clone().into(), PluralRuleType::Cardinal.into())
            .map_err(|e| {
                I18nError::InvalidLocale(format!(
                    "Failed to create PluralRules for locale '{}': {}",
                    locale_str, e
                ))
            })?;
        Ok(CldrRule {
            locale,
            rules: Arc::new(rules),
        })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn category(&self, n: f64) -> PluralCategory {
        if n.fract() != 0.0 || !(0.0..=usize::MAX as f64).contains(&n) {
            return PluralCategory::Other;
        }
        self.rules.category_for(n as usize)
    }
}

impl std::fmt::Debug for CldrRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CldrRule")
            .field("locale", &self.locale)
            .finish()
    }
}

impl PluralRule for CldrRule {
    fn categories(&self, n: f64) -> Vec<String> {
        vec![category_tag(self.category(n)).to_string()]
    }
}

pub fn category_tag(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Plural rules keyed by locale code.
#[derive(Clone, Default)]
pub struct PluralRuleTable {
    rules: HashMap<String, Arc<dyn PluralRule>>,
}

impl PluralRuleTable {
    pub fn new() -> Self {
        PluralRuleTable::default()
    }

    /// A table with ICU-backed rules for each of `locales`.
    pub fn with_cldr_rules(locales: &[&str]) -> I18nResult<Self> {
        let mut table = PluralRuleTable::new();
        for locale in locales {
            table.with_rule(locale, CldrRule::try_new(locale)?);
        }
        Ok(table)
    }

    pub fn with_rule(&mut self, locale: &str, rule: impl PluralRule + 'static) -> &mut Self {
        self.rules.insert(locale.to_owned(), Arc::new(rule));
        self
    }

    /// The rule for `locale`, else the `en` rule, else [`EnglishRule`].
    pub fn rule_for(&self, locale: &str) -> &dyn PluralRule {
        self.rules
            .get(locale)
            .or_else(|| self.rules.get("en"))
            .map(|rule| &**rule)
            .unwrap_or(&EnglishRule)
    }
}

impl std::fmt::Debug for PluralRuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluralRuleTable")
            .field("locales", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
