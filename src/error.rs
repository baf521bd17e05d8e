/// Error types for translation lookup, number formatting and loading
#[derive(Debug, Clone, PartialEq)]
pub enum I18nError {
    /// Interpolation reached a node that is not a leaf template
    NotATemplate(String),
    /// A number could not be formatted (NaN or infinite)
    InvalidNumber(f64),
    /// Error while reading or parsing locale data
    Load(String),
    /// A locale code could not be parsed or has no plural data
    InvalidLocale(String),
    /// Malformed argument supplied by a caller
    InvalidArgument(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            I18nError::NotATemplate(scope) => write!(f, "Not a template: {}", scope),
            I18nError::InvalidNumber(value) => write!(f, "Invalid number: {}", value),
            I18nError::Load(msg) => write!(f, "Load error: {}", msg),
            I18nError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
            I18nError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for I18nError {}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
