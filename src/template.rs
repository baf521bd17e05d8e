use std::sync::LazyLock;

use regex::Regex;

use crate::options::TranslateOptions;

/// `{{name}}` or `%{name}`. A single closing brace also ends a `{{name}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\{\{|%\{)(.*?)\}\}?").expect("placeholder pattern is valid")
});

#[derive(Debug, PartialEq)]
pub enum TemplateNode<'a> {
    Text(&'a str),
    Placeholder(Placeholder<'a>),
}

/// A substitution site within a template.
#[derive(Debug, PartialEq)]
pub struct Placeholder<'a> {
    /// The placeholder as written, e.g. `%{count}`
    pub raw: &'a str,
    pub name: &'a str,
}

impl<'a> Placeholder<'a> {
    /// The value for this placeholder, or the inline missing-value marker.
    pub fn localize(&self, options: &TranslateOptions) -> String {
        match options.value(self.name) {
            Some(value) => value.into_owned(),
            None => missing_value(self.raw),
        }
    }
}

/// Marker substituted for a placeholder without a value.
pub fn missing_value(raw: &str) -> String {
    format!("[missing {} value]", raw)
}

/// A template split into literal text and placeholders.
#[derive(Debug, PartialEq)]
pub struct Template<'a>(pub Vec<TemplateNode<'a>>);

impl<'a> Template<'a> {
    pub fn parse(input: &'a str) -> Self {
        let mut nodes = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(input) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                nodes.push(TemplateNode::Text(&input[last..whole.start()]));
            }
            nodes.push(TemplateNode::Placeholder(Placeholder {
                raw: whole.as_str(),
                name: name.as_str(),
            }));
            last = whole.end();
        }
        if last < input.len() {
            nodes.push(TemplateNode::Text(&input[last..]));
        }
        Template(nodes)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder<'a>> {
        self.0.iter().filter_map(|node| match node {
            TemplateNode::Placeholder(placeholder) => Some(placeholder),
            TemplateNode::Text(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substitute every placeholder in a single pass.
    ///
    /// Values are inserted as-is: a `$1` or `{{x}}` inside a value is never
    /// expanded again.
    pub fn interpolate(&self, options: &TranslateOptions) -> String {
        let mut result = String::new();
        for node in &self.0 {
            match node {
                TemplateNode::Text(text) => result.push_str(text),
                TemplateNode::Placeholder(placeholder) => {
                    result.push_str(&placeholder.localize(options))
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let template = Template::parse("Hi {{name}}, you have %{count} new");
        assert_eq!(
            template,
            Template(vec![
                TemplateNode::Text("Hi "),
                TemplateNode::Placeholder(Placeholder {
                    raw: "{{name}}",
                    name: "name"
                }),
                TemplateNode::Text(", you have "),
                TemplateNode::Placeholder(Placeholder {
                    raw: "%{count}",
                    name: "count"
                }),
                TemplateNode::Text(" new"),
            ])
        );
        assert_eq!(template.placeholders().count(), 2);
    }

    #[test]
    fn test_parse_plain_text() {
        let template = Template::parse("No placeholders {here");
        assert_eq!(template.len(), 1);
        assert_eq!(template.placeholders().count(), 0);
        assert!(Template::parse("").is_empty());
    }

    #[test]
    fn test_interpolate() {
        let options = TranslateOptions::new().with_value("name", "Ada");
        assert_eq!(
            Template::parse("{{name}} and %{name}").interpolate(&options),
            "Ada and Ada"
        );
    }

    #[test]
    fn test_missing_value_marker() {
        let options = TranslateOptions::new();
        assert_eq!(
            Template::parse("Hi {{name}}").interpolate(&options),
            "Hi [missing {{name}} value]"
        );
        assert_eq!(
            Template::parse("Hi %{name}").interpolate(&options),
            "Hi [missing %{name} value]"
        );
    }

    #[test]
    fn test_values_are_literal() {
        let options = TranslateOptions::new()
            .with_value("price", "$1 and $$")
            .with_value("nested", "{{price}}");
        assert_eq!(
            Template::parse("Cost: {{price}} / {{nested}}").interpolate(&options),
            "Cost: $1 and $$ / {{price}}"
        );
    }
}
