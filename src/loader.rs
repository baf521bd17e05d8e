use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{I18nError, I18nResult};
use crate::node::Translations;
use crate::store::LocaleTable;

fn read_json(path: &Path) -> I18nResult<serde_json::Map<String, Value>> {
    // Read the file
    let content = fs::read_to_string(path).map_err(|e| {
        I18nError::Load(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    // Parse JSON
    let json: Value = serde_json::from_str(&content).map_err(|e| {
        I18nError::Load(format!("Failed to parse JSON from '{}': {}", path.display(), e))
    })?;

    // Ensure it's an object
    match json {
        Value::Object(obj) => Ok(obj),
        _ => Err(I18nError::Load(format!(
            "Invalid JSON in '{}': root must be an object",
            path.display()
        ))),
    }
}

/// Load a whole locale table from a single JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "en": { "js": { "topic": { "title": "Topic" } } },
///     "fr": { "js": { "topic": { "title": "Sujet" } } }
/// }
/// ```
///
/// Keys starting with `@` are metadata and skipped.
///
/// # Errors
/// - File not found
/// - Invalid JSON
/// - A locale entry that is not an object
pub fn load_table_from_file(path: &Path) -> I18nResult<LocaleTable> {
    let obj = read_json(path)?;

    let mut table = LocaleTable::new();
    for (locale, value) in &obj {
        if locale.starts_with('@') {
            continue;
        }
        match value {
            Value::Object(tree) => {
                table.with_translations(locale, Translations::from_json_object("", tree));
            }
            _ => {
                return Err(I18nError::Load(format!(
                    "Locale '{}' in '{}' is not an object",
                    locale,
                    path.display()
                )));
            }
        }
    }
    Ok(table)
}

/// Load the translations tree of one locale from a JSON file
///
/// When the only top-level key is `locale` itself (`{"fr": {...}}`), that
/// level is unwrapped.
pub fn load_translations_from_file(path: &Path, locale: &str) -> I18nResult<Translations> {
    let mut obj = read_json(path)?;
    obj.retain(|key, _| !key.starts_with('@'));

    if obj.len() == 1 {
        if let Some(Value::Object(inner)) = obj.get(locale) {
            return Ok(Translations::from_json_object("", inner));
        }
    }
    Ok(Translations::from_json_object("", &obj))
}

/// Load all locales from a directory of JSON files
///
/// Scans the directory for all `*.json` files and loads them.
/// The filename (without extension) is used as the locale code.
/// For example: `en.json` -> locale `"en"`, `pt_BR.json` -> locale `"pt_BR"`.
/// Files named `<locale>.extras.json` fill the extras tier of that locale.
pub fn load_all_from_dir(dir: &Path) -> I18nResult<LocaleTable> {
    // Check if directory exists
    if !dir.exists() {
        return Err(I18nError::Load(format!(
            "Directory not found: {}",
            dir.display()
        )));
    }

    if !dir.is_dir() {
        return Err(I18nError::Load(format!(
            "Path is not a directory: {}",
            dir.display()
        )));
    }

    let mut table = LocaleTable::new();

    let entries = fs::read_dir(dir).map_err(|e| {
        I18nError::Load(format!(
            "Failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    for entry in entries {
        let entry =
            entry.map_err(|e| I18nError::Load(format!("Error reading directory entry: {}", e)))?;

        let path = entry.path();

        // Only process JSON files
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| I18nError::Load(format!("Invalid filename: {}", path.display())))?
            .to_string();

        match stem.strip_suffix(".extras") {
            Some(locale) => {
                let extras = load_translations_from_file(&path, locale)?;
                table.with_extras(locale, extras);
            }
            None => {
                let translations = load_translations_from_file(&path, &stem)?;
                table.with_translations(&stem, translations);
            }
        }
    }

    if table.is_empty() {
        tracing::warn!("No JSON files found in directory {}", dir.display());
    }

    Ok(table)
}

/// Load a table from either a single JSON file or a directory.
pub fn load_table(path: &Path) -> I18nResult<LocaleTable> {
    if path.is_dir() {
        load_all_from_dir(path)
    } else {
        load_table_from_file(path)
    }
}
