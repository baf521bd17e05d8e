use crate::error::{I18nError, I18nResult};
use crate::node::{Resolved, TranslationNode, Translations};
use crate::options::TranslateOptions;
use crate::scope::Scope;
use crate::translator::Translator;

pub const DEFAULT_PRECISION: usize = 3;
pub const DEFAULT_SEPARATOR: &str = ".";
pub const DEFAULT_DELIMITER: &str = ",";
pub const DEFAULT_HUMAN_SIZE_FORMAT: &str = "%n %u";

const KILOBYTE: f64 = 1024.0;
const STORAGE_UNITS: [&str; 4] = ["kb", "mb", "gb", "tb"];

/// Largest magnitude that survives scaling without losing integer precision.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

/// Number formatting options. Unset fields fall back to the locale's
/// `number.format` entries and then to the static defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberFormat {
    pub precision: Option<usize>,
    pub separator: Option<String>,
    pub delimiter: Option<String>,
    pub strip_insignificant_zeros: Option<bool>,
}

impl NumberFormat {
    pub fn new() -> Self {
        NumberFormat::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = Some(separator.to_owned());
        self
    }

    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = Some(delimiter.to_owned());
        self
    }

    pub fn with_strip_insignificant_zeros(mut self, strip: bool) -> Self {
        self.strip_insignificant_zeros = Some(strip);
        self
    }

    /// Fill every unset field from `defaults`.
    pub fn or(self, defaults: &NumberFormat) -> Self {
        NumberFormat {
            precision: self.precision.or(defaults.precision),
            separator: self.separator.or_else(|| defaults.separator.clone()),
            delimiter: self.delimiter.or_else(|| defaults.delimiter.clone()),
            strip_insignificant_zeros: self
                .strip_insignificant_zeros
                .or(defaults.strip_insignificant_zeros),
        }
    }

    /// Read `precision`, `separator`, `delimiter` and
    /// `strip_insignificant_zeros` from a `number.format` branch.
    pub fn from_translations(branch: &Translations) -> Self {
        let leaf = |key: &str| match branch.get(key) {
            Some(TranslationNode::Leaf(text)) => Some(text.as_str()),
            _ => None,
        };
        NumberFormat {
            precision: leaf("precision").and_then(|p| p.trim().parse().ok()),
            separator: leaf("separator").map(str::to_owned),
            delimiter: leaf("delimiter").map(str::to_owned),
            strip_insignificant_zeros: leaf("strip_insignificant_zeros").map(|v| v == "true"),
        }
    }
}

/// Format `number` with digit grouping and a fixed number of decimals.
///
/// Rounds half away from zero at the requested precision, groups the
/// integer digits in threes from the right and prefixes the sign last.
/// A value that rounds to zero has no sign.
///
/// Rounding is applied to the scaled float `|number| * 10^precision`, not to
/// the exact decimal value of `number`. `1.45` scales to exactly `14.5` and
/// gives `1.5`, while `1.005` scales to `100.49999...` and gives `1.00`.
pub fn format_number(number: f64, format: &NumberFormat) -> I18nResult<String> {
    if !number.is_finite() {
        return Err(I18nError::InvalidNumber(number));
    }
    let precision = format.precision.unwrap_or(DEFAULT_PRECISION);
    let separator = format.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
    let delimiter = format.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER);
    let strip = format.strip_insignificant_zeros.unwrap_or(false);

    let (integer, mut fraction) = to_fixed(number.abs(), precision);
    let is_zero = integer.bytes().chain(fraction.bytes()).all(|b| b == b'0');

    if strip {
        let trimmed = fraction.trim_end_matches('0').len();
        fraction.truncate(trimmed);
    }

    let mut formatted = group_digits(&integer, delimiter);
    if !fraction.is_empty() {
        formatted.push_str(separator);
        formatted.push_str(&fraction);
    }
    if number < 0.0 && !is_zero {
        formatted.insert(0, '-');
    }
    Ok(formatted)
}

/// Integer and fractional digits of `abs` rounded to `precision` decimals.
fn to_fixed(abs: f64, precision: usize) -> (String, String) {
    let scaled = (abs * 10f64.powi(precision as i32)).round();
    let digits = if scaled < MAX_EXACT {
        format!("{:0width$}", scaled as u64, width = precision + 1)
    } else {
        // Beyond exact integer range the float's own decimal expansion is used.
        format!("{:.*}", precision, abs).replace('.', "")
    };
    let (integer, fraction) = digits.split_at(digits.len() - precision);
    (integer.to_string(), fraction.to_string())
}

/// Join 3-digit chunks, counted from the right, with `delimiter`.
fn group_digits(integer: &str, delimiter: &str) -> String {
    let mut chunks = Vec::new();
    let mut end = integer.len();
    while end > 0 {
        let start = end.saturating_sub(3);
        chunks.push(&integer[start..end]);
        end = start;
    }
    chunks.reverse();
    chunks.join(delimiter)
}

impl Translator {
    /// The current locale's `number.format` settings.
    pub fn locale_number_format(&self) -> NumberFormat {
        let options = TranslateOptions::new();
        match self.lookup(&Scope::from("number.format"), &options) {
            Some(Resolved::Node(TranslationNode::Branch(branch))) => {
                NumberFormat::from_translations(branch)
            }
            _ => NumberFormat::default(),
        }
    }

    /// [`format_number`] with unset options taken from the current locale.
    pub fn format_number(&self, number: f64, format: &NumberFormat) -> I18nResult<String> {
        let format = format.clone().or(&self.locale_number_format());
        format_number(number, &format)
    }

    /// Format a byte count as e.g. `1.5 MB`.
    ///
    /// Divides by 1024 at most four times. Unit labels and the `%n %u`
    /// template come from `number.human.storage_units`. Precision is 0 for
    /// whole values and 1 otherwise unless `format` sets it.
    pub fn format_human_size(&self, bytes: f64, format: &NumberFormat) -> I18nResult<String> {
        if !bytes.is_finite() {
            return Err(I18nError::InvalidNumber(bytes));
        }
        let mut size = bytes;
        let mut iterations = 0;
        while size >= KILOBYTE && iterations < STORAGE_UNITS.len() {
            size /= KILOBYTE;
            iterations += 1;
        }

        let (unit, precision) = if iterations == 0 {
            let options = TranslateOptions::new().with_count(size);
            (self.t("number.human.storage_units.units.byte", &options), 0)
        } else {
            let scope = format!(
                "number.human.storage_units.units.{}",
                STORAGE_UNITS[iterations - 1]
            );
            let precision = if size.fract() == 0.0 { 0 } else { 1 };
            (self.t(scope, &TranslateOptions::new()), precision)
        };

        let defaults = NumberFormat::new()
            .with_precision(precision)
            .with_delimiter("");
        let number = self.format_number(size, &format.clone().or(&defaults))?;

        let options = TranslateOptions::new();
        let format_scope = Scope::from("number.human.storage_units.format");
        let template = match self.lookup(&format_scope, &options) {
            Some(Resolved::Text(text)) => text.into_owned(),
            _ => DEFAULT_HUMAN_SIZE_FORMAT.to_string(),
        };
        Ok(template.replacen("%u", &unit, 1).replacen("%n", &number, 1))
    }
}
