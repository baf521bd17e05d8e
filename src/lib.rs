//! Dotted-scope translation lookup with pluralization, interpolation and
//! locale fallback.
//!
//! ```
//! use std::sync::Arc;
//! use dotted_i18n::{LocaleTable, PluralForms, TranslateOptions, Translations, Translator};
//!
//! let en = Translations::new().with_branch(
//!     "js",
//!     Translations::new()
//!         .with_leaf("greeting", "Hello, {{name}}!")
//!         .with_plural(
//!             "replies",
//!             PluralForms::new()
//!                 .with_form("one", "1 reply")
//!                 .with_form("other", "%{count} replies"),
//!         ),
//! );
//! let mut table = LocaleTable::new();
//! table.with_translations("en", en);
//!
//! let i18n = Translator::new(Arc::new(table));
//! assert_eq!(
//!     i18n.t("greeting", &TranslateOptions::new().with_value("name", "World")),
//!     "Hello, World!"
//! );
//! assert_eq!(i18n.t("replies", &TranslateOptions::new().with_count(3)), "3 replies");
//! assert_eq!(i18n.t("nope", &TranslateOptions::new()), "[en.nope]");
//! ```

pub mod context;
pub mod error;
pub mod loader;
pub mod message_format;
pub mod node;
pub mod number;
pub mod options;
pub mod plural;
pub mod scope;
pub mod store;
pub mod template;
pub mod translator;
pub mod verbose;

#[cfg(test)]
mod integration_tests;

// Re-export main types for convenient access
pub use context::TranslationContext;
pub use error::{I18nError, I18nResult};
pub use loader::{load_all_from_dir, load_table, load_table_from_file};
pub use message_format::{CompiledMessages, MessageFormatter};
pub use node::{PluralForms, Resolved, TranslationNode, Translations};
pub use number::{NumberFormat, format_number};
pub use options::TranslateOptions;
pub use plural::{CldrRule, EnglishRule, PluralRule, PluralRuleTable};
pub use scope::Scope;
pub use store::LocaleTable;
pub use template::Template;
pub use translator::Translator;
pub use verbose::{DiagnosticSink, VerboseTranslator, with_verbose_logging};
