use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Category tags a plural map may be keyed by, besides exact numeric tags like `"0"`.
pub const PLURAL_TAGS: [&str; 7] = ["zero", "one", "two", "few", "many", "other", "none"];

/// Returns true for a CLDR category tag or an exact numeric tag.
pub fn is_plural_tag(key: &str) -> bool {
    PLURAL_TAGS.contains(&key) || (!key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()))
}

/// A single node of a translations tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationNode {
    /// A template string, possibly with `{{name}}` or `%{name}` placeholders
    Leaf(String),
    /// A nested level of the tree
    Branch(Translations),
    /// Count-dependent variants keyed by plural category
    Plural(PluralForms),
}

impl TranslationNode {
    /// Build a node from parsed JSON.
    ///
    /// Objects whose keys are all plural tags and whose values are all strings
    /// become [`TranslationNode::Plural`]; other objects become branches.
    /// Numbers and booleans are kept as their JSON text. `null` and arrays have
    /// no template meaning and are skipped.
    pub fn from_json(path: &str, value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(TranslationNode::Leaf(s.clone())),
            Value::Number(n) => Some(TranslationNode::Leaf(n.to_string())),
            Value::Bool(b) => Some(TranslationNode::Leaf(b.to_string())),
            Value::Object(obj) => {
                let plural = !obj.is_empty()
                    && obj.iter().all(|(k, v)| is_plural_tag(k) && v.is_string());
                if plural {
                    let forms = obj
                        .iter()
                        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                        .collect();
                    Some(TranslationNode::Plural(PluralForms(forms)))
                } else {
                    Some(TranslationNode::Branch(Translations::from_json_object(path, obj)))
                }
            }
            Value::Null | Value::Array(_) => {
                tracing::warn!("Translation '{}' is not a string or object, skipping", path);
                None
            }
        }
    }
}

/// A lookup result: either template text or a non-leaf node.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    Text(Cow<'a, str>),
    Node(&'a TranslationNode),
}

impl<'a> Resolved<'a> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Resolved::Text(text) => Some(text.as_ref()),
            Resolved::Node(_) => None,
        }
    }
}

/// Plural variants of one phrase, keyed by category tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PluralForms(pub HashMap<String, String>);

impl PluralForms {
    pub fn new() -> Self {
        PluralForms(HashMap::new())
    }
    pub fn with_form(mut self, tag: &str, template: &str) -> Self {
        self.0.insert(tag.to_owned(), template.to_owned());
        self
    }
    pub fn get(&self, tag: &str) -> Option<&String> {
        self.0.get(tag)
    }
}

/// A translations tree for one locale.
///
/// Keyed by segment, e.g. tree["js"]["topic"]["title"] = "Topic". The tree
/// is built once and only read afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Translations(pub HashMap<String, TranslationNode>);

impl Translations {
    pub fn new() -> Self {
        Translations(HashMap::new())
    }

    pub fn with_node(mut self, key: &str, node: TranslationNode) -> Self {
        self.0.insert(key.to_owned(), node);
        self
    }

    pub fn with_leaf(self, key: &str, template: &str) -> Self {
        self.with_node(key, TranslationNode::Leaf(template.to_owned()))
    }

    pub fn with_branch(self, key: &str, branch: Translations) -> Self {
        self.with_node(key, TranslationNode::Branch(branch))
    }

    pub fn with_plural(self, key: &str, forms: PluralForms) -> Self {
        self.with_node(key, TranslationNode::Plural(forms))
    }

    pub fn get(&self, key: &str) -> Option<&TranslationNode> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Walk the tree one segment per level.
    ///
    /// Fails as soon as a segment is absent or the current node is a leaf.
    /// A plural map is a mapping too, so a trailing category segment selects
    /// one of its forms directly.
    pub fn walk<'a, 's, I>(&'a self, segments: I) -> Option<Resolved<'a>>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut segments = segments.into_iter();
        let first = segments.next()?;
        let mut current = self.get(first)?;
        while let Some(segment) = segments.next() {
            current = match current {
                TranslationNode::Branch(branch) => branch.get(segment)?,
                TranslationNode::Plural(forms) => {
                    let form = forms.get(segment)?;
                    // A form is a leaf, nothing may follow it.
                    return match segments.next() {
                        None => Some(Resolved::Text(Cow::Borrowed(form.as_str()))),
                        Some(_) => None,
                    };
                }
                TranslationNode::Leaf(_) => return None,
            };
        }
        match current {
            TranslationNode::Leaf(text) => Some(Resolved::Text(Cow::Borrowed(text.as_str()))),
            node => Some(Resolved::Node(node)),
        }
    }

    pub fn from_json_object(path: &str, obj: &serde_json::Map<String, Value>) -> Self {
        let mut tree = HashMap::new();
        for (key, value) in obj {
            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            if let Some(node) = TranslationNode::from_json(&child_path, value) {
                tree.insert(key.clone(), node);
            }
        }
        Translations(tree)
    }
}

impl<'de> Deserialize<'de> for Translations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(obj) => Ok(Translations::from_json_object("", &obj)),
            _ => Err(serde::de::Error::custom(
                "translations root must be an object",
            )),
        }
    }
}
