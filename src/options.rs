use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

/// Caller-supplied options for a single translation.
///
/// Holds the interpolation values plus the control fields `locale`, `count`,
/// `defaultValue` and `scope`. Control fields can be interpolated too, so
/// `%{count}` renders the count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        TranslateOptions::default()
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_owned());
        self
    }

    pub fn with_count(mut self, count: impl Into<f64>) -> Self {
        self.count = Some(count.into());
        self
    }

    pub fn with_default_value(mut self, default_value: &str) -> Self {
        self.default_value = Some(default_value.to_owned());
        self
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_owned());
        self
    }

    pub fn with_value(mut self, name: &str, value: impl ToString) -> Self {
        self.values.insert(name.to_owned(), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.locale.is_none()
            && self.count.is_none()
            && self.default_value.is_none()
            && self.scope.is_none()
            && self.values.is_empty()
    }

    /// Value substituted for placeholder `name`, if any.
    pub fn value(&self, name: &str) -> Option<Cow<'_, str>> {
        if let Some(value) = self.values.get(name) {
            return Some(Cow::Borrowed(value.as_str()));
        }
        match name {
            "count" => self.count.map(|count| Cow::Owned(count_text(count))),
            "locale" => self.locale.as_deref().map(Cow::Borrowed),
            "defaultValue" => self.default_value.as_deref().map(Cow::Borrowed),
            "scope" => self.scope.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

/// Decimal text of a count, with `-0` written as `0`.
pub(crate) fn count_text(count: f64) -> String {
    let count = if count == 0.0 { 0.0 } else { count };
    count.to_string()
}
