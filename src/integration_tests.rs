//! End-to-end tests over a JSON-loaded locale table.

use std::sync::Arc;

use serde_json::json;

use crate::context::TranslationContext;
use crate::node::Translations;
use crate::number::{NumberFormat, format_number};
use crate::options::TranslateOptions;
use crate::plural::{CldrRule, PluralRuleTable};
use crate::store::LocaleTable;
use crate::translator::Translator;
use crate::verbose::with_verbose_logging;

fn tree(value: serde_json::Value) -> Translations {
    serde_json::from_value(value).unwrap()
}

fn table() -> LocaleTable {
    let mut table = LocaleTable::new();
    table
        .with_translations(
            "en",
            tree(json!({
                "js": {
                    "welcome": "Welcome, {{username}}!",
                    "price": "Costs %{amount}",
                    "topic": {
                        "replies": { "one": "%{count} reply", "other": "%{count} replies" },
                        "unread": {
                            "0": "no unread",
                            "one": "1 unread",
                            "other": "%{count} unread"
                        }
                    },
                    "only_en": "English only",
                    "number": {
                        "human": {
                            "storage_units": {
                                "format": "%n %u",
                                "units": {
                                    "byte": { "one": "Byte", "other": "Byte" },
                                    "kb": "KB", "mb": "MB", "gb": "GB", "tb": "TB"
                                }
                            }
                        }
                    }
                }
            })),
        )
        .with_translations(
            "ru",
            tree(json!({
                "js": {
                    "topic": {
                        "replies": {
                            "one": "%{count} ответ",
                            "few": "%{count} ответа",
                            "many": "%{count} ответов",
                            "other": "%{count} ответа"
                        }
                    }
                }
            })),
        )
        .with_translations("fr", Translations::new())
        .with_translations("de", Translations::new())
        .with_extras(
            "en",
            tree(json!({ "admin": { "dashboard": "Dashboard" } })),
        );
    table
}

fn translator(context: TranslationContext) -> Translator {
    Translator::new(Arc::new(table())).with_context(context)
}

#[test]
fn test_present_scope_is_interpolated() {
    let i18n = translator(TranslationContext::new());
    let options = TranslateOptions::new().with_value("username", "sam");
    assert_eq!(i18n.t("welcome", &options), "Welcome, sam!");
}

#[test]
fn test_absent_scope_diagnostic() {
    let i18n = translator(TranslationContext::new().with_locale("fr"));
    assert_eq!(i18n.t("no.such.key", &TranslateOptions::new()), "[fr.no.such.key]");
    assert_eq!(
        i18n.t(vec!["no", "such"], &TranslateOptions::new()),
        "[fr.no.such]"
    );
}

#[test]
fn test_plural_selection() {
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
        i18n.t("topic.unread", &TranslateOptions::new().with_count(0)),
        "no unread"
    );
    assert_eq!(
        i18n.t("topic.unread", &TranslateOptions::new().with_count(-0.0)),
        "no unread"
    );
}

#[test]
fn test_missing_placeholder_marker() {
    let i18n = translator(TranslationContext::new());
    assert_eq!(
        i18n.t("welcome", &TranslateOptions::new()),
        "Welcome, [missing {{username}} value]!"
    );
}

#[test]
fn test_dollar_values_are_literal() {
    let i18n = translator(TranslationContext::new());
    let options = TranslateOptions::new().with_value("amount", "$1.00 ($&)");
    assert_eq!(i18n.t("price", &options), "Costs $1.00 ($&)");
}

#[test]
fn test_fallback_chain_order() {
    let context = TranslationContext::new()
        .with_locale("fr")
        .with_fallback_locale("de")
        .with_default_locale("en");
    let i18n = translator(context.clone());
    assert_eq!(i18n.t("only_en", &TranslateOptions::new()), "English only");

    let i18n = translator(context.with_no_fallbacks(true));
    assert_eq!(i18n.t("only_en", &TranslateOptions::new()), "[fr.only_en]");
}

#[test]
fn test_fallback_locale_is_tried_before_default() {
    let mut table = table();
    table.with_translations("de", tree(json!({ "js": { "only_en": "Nur Deutsch" } })));
    let i18n = Translator::new(Arc::new(table)).with_context(
        TranslationContext::new()
            .with_locale("fr")
            .with_fallback_locale("de"),
    );
    assert_eq!(i18n.t("only_en", &TranslateOptions::new()), "Nur Deutsch");
}

#[test]
fn test_missing_plural_form_moves_on_to_the_next_locale() {
    let mut table = table();
    table
        .with_translations(
            "fr",
            tree(json!({ "js": { "topic": { "replies": { "one": "un" } } } })),
        )
        .with_translations(
            "de",
            tree(json!({ "js": { "topic": { "replies": { "one": "ein" } } } })),
        );
    let i18n = Translator::new(Arc::new(table)).with_context(
        TranslationContext::new()
            .with_locale("fr")
            .with_fallback_locale("de"),
    );

    // fr and de both have the map but no "other" form; en has it
    let options = TranslateOptions::new().with_count(4);
    assert_eq!(i18n.t("topic.replies", &options), "4 replies");
    // A form the current locale has is used directly
    let options = TranslateOptions::new().with_count(1);
    assert_eq!(i18n.t("topic.replies", &options), "un");
}

#[test]
fn test_fallback_locale_supplies_a_missing_plural_form() {
    let mut table = table();
    table
        .with_translations(
            "fr",
            tree(json!({ "js": { "topic": { "replies": { "one": "un" } } } })),
        )
        .with_translations(
            "de",
            tree(json!({ "js": { "topic": { "replies": { "other": "%{count} Antworten" } } } })),
        );
    let i18n = Translator::new(Arc::new(table)).with_context(
        TranslationContext::new()
            .with_locale("fr")
            .with_fallback_locale("de"),
    );
    let options = TranslateOptions::new().with_count(4);
    assert_eq!(i18n.t("topic.replies", &options), "4 Antworten");
}

#[test]
fn test_literal_en_is_the_last_resort() {
    let i18n = translator(
        TranslationContext::new()
            .with_locale("fr")
            .with_default_locale("de"),
    );
    assert_eq!(i18n.t("only_en", &TranslateOptions::new()), "English only");
}

#[test]
fn test_extras_tier() {
    let i18n = translator(TranslationContext::new());
    assert_eq!(i18n.t("admin.dashboard", &TranslateOptions::new()), "Dashboard");
}

#[test]
fn test_cldr_plural_rules() {
    let mut rules = PluralRuleTable::new();
    rules.with_rule("ru", CldrRule::try_new("ru").unwrap());
    let i18n = translator(TranslationContext::new().with_locale("ru")).with_plural_rules(rules);

    let replies = |count: i32| i18n.t("topic.replies", &TranslateOptions::new().with_count(count));
    assert_eq!(replies(1), "1 ответ");
    assert_eq!(replies(3), "3 ответа");
    assert_eq!(replies(11), "11 ответов");
    assert_eq!(replies(21), "21 ответ");
}

#[test]
fn test_number_formatting() {
    let format = NumberFormat::new()
        .with_precision(2)
        .with_delimiter(",")
        .with_separator(".");
    assert_eq!(format_number(1234.5, &format).unwrap(), "1,234.50");
    assert_eq!(
        format_number(-1234.5, &NumberFormat::new().with_precision(0)).unwrap(),
        "-1,235"
    );
}

#[test]
fn test_human_size() {
    let i18n = translator(TranslationContext::new());
    assert_eq!(
        i18n.format_human_size(1024.0, &NumberFormat::new()).unwrap(),
        "1 KB"
    );
    assert_eq!(
        i18n.format_human_size(500.0, &NumberFormat::new()).unwrap(),
        "500 Byte"
    );
}

#[test]
fn test_verbose_mode_end_to_end() {
    let i18n = translator(TranslationContext::new().with_locale("fr"));
    let verbose = with_verbose_logging(i18n, |_: &str| {});
    assert_eq!(verbose.t("only_en", &TranslateOptions::new()), "[fr.only_en] (#1)");
    let options = TranslateOptions::new()
        .with_locale("en")
        .with_value("username", "a");
    assert_eq!(verbose.t("welcome", &options), "Welcome, a! (#2)");
}

#[test]
fn test_translator_is_shareable_across_threads() {
    let i18n = Arc::new(translator(TranslationContext::new()));
    let handles: Vec<_> = (1..=4)
        .map(|count| {
            let i18n = Arc::clone(&i18n);
            std::thread::spawn(move || {
                i18n.t("topic.replies", &TranslateOptions::new().with_count(count))
            })
        })
        .collect();
    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["1 reply", "2 replies", "3 replies", "4 replies"]);
}
