use std::fmt;

/// Separator between scope segments.
pub const SEPARATOR: &str = ".";

/// A lookup target: a dotted path or an ordered list of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Path(String),
    Segments(Vec<String>),
}

impl Scope {
    /// The scope as a dotted path.
    pub fn to_path(&self) -> String {
        match self {
            Scope::Path(path) => path.clone(),
            Scope::Segments(segments) => segments.join(SEPARATOR),
        }
    }

    /// Prefix `prefix` and then the root namespace, if not already rooted.
    ///
    /// `("topic.title", None, "js")` gives `js.topic.title`,
    /// `("title", Some("topic"), "js")` gives `js.topic.title`.
    pub fn normalize(&self, prefix: Option<&str>, root: &str) -> String {
        let path = self.with_prefix(prefix);
        let first = path.split(SEPARATOR).next().unwrap_or_default();
        if root.is_empty() || first == root {
            path
        } else {
            format!("{}{}{}", root, SEPARATOR, path)
        }
    }

    /// The scope with `prefix` prepended but without the root namespace.
    pub fn with_prefix(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => format!("{}{}{}", prefix, SEPARATOR, self.to_path()),
            None => self.to_path(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

impl From<&str> for Scope {
    fn from(path: &str) -> Self {
        Scope::Path(path.to_owned())
    }
}

impl From<String> for Scope {
    fn from(path: String) -> Self {
        Scope::Path(path)
    }
}

impl From<&String> for Scope {
    fn from(path: &String) -> Self {
        Scope::Path(path.clone())
    }
}

impl From<Vec<String>> for Scope {
    fn from(segments: Vec<String>) -> Self {
        Scope::Segments(segments)
    }
}

impl From<Vec<&str>> for Scope {
    fn from(segments: Vec<&str>) -> Self {
        Scope::Segments(segments.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Scope {
    fn from(segments: [&str; N]) -> Self {
        Scope::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}
