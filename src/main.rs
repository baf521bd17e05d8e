use std::path::PathBuf;
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use dotted_i18n::{
    I18nError, LocaleTable, NumberFormat, PluralRuleTable, TranslateOptions, TranslationContext,
    Translator, VerboseTranslator, format_number, load_table,
};

fn data_arg() -> Arg {
    Arg::new("data")
        .long("data")
        .short('d')
        .help("JSON file keyed by locale, or a directory of <locale>.json files")
        .value_parser(value_parser!(PathBuf))
}

fn locale_arg() -> Arg {
    Arg::new("locale")
        .long("locale")
        .short('l')
        .help("Current locale (default: the default locale)")
}

fn cli() -> Command {
    Command::new("dotted-i18n")
        .version("0.1.0")
        .about("Resolve translations and format numbers from JSON locale data")
        .subcommand_required(true)
        .subcommand(
            Command::new("translate")
                .about("Translate a dotted scope")
                .arg(
                    Arg::new("scope")
                        .help("Dotted scope, e.g. topic.title")
                        .required(true)
                        .index(1),
                )
                .arg(data_arg().required(true))
                .arg(locale_arg())
                .arg(
                    Arg::new("fallback-locale")
                        .long("fallback-locale")
                        .help("Locale tried first when the current locale lacks a key"),
                )
                .arg(
                    Arg::new("default-locale")
                        .long("default-locale")
                        .help("Default locale (default: en)")
                        .default_value("en"),
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('c')
                        .help("Count used for pluralization")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("default")
                        .long("default")
                        .help("Text used when the scope is not found"),
                )
                .arg(
                    Arg::new("scope-prefix")
                        .long("scope")
                        .help("Prefix prepended to the scope"),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .short('s')
                        .help("Interpolation value as name=value (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("plural-rules")
                        .long("plural-rules")
                        .help("Use CLDR plural rules for the given locales (comma separated)")
                        .value_delimiter(','),
                )
                .arg(
                    Arg::new("no-fallbacks")
                        .long("no-fallbacks")
                        .help("Do not try other locales")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .short('v')
                        .help("Number each scope and log it once")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("number")
                .about("Format a number")
                .arg(
                    Arg::new("value")
                        .required(true)
                        .index(1)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(data_arg())
                .arg(locale_arg())
                .arg(
                    Arg::new("precision")
                        .long("precision")
                        .short('p')
                        .value_parser(value_parser!(usize)),
                )
                .arg(Arg::new("separator").long("separator"))
                .arg(Arg::new("delimiter").long("delimiter"))
                .arg(
                    Arg::new("strip-zeros")
                        .long("strip-zeros")
                        .help("Strip insignificant trailing zeros")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("human-size")
                .about("Format a byte count, e.g. 1.5 MB")
                .arg(
                    Arg::new("bytes")
                        .required(true)
                        .index(1)
                        .value_parser(value_parser!(f64)),
                )
                .arg(data_arg())
                .arg(locale_arg()),
        )
}

fn load(matches: &ArgMatches) -> Result<LocaleTable, I18nError> {
    match matches.get_one::<PathBuf>("data") {
        Some(path) => load_table(path),
        None => Ok(LocaleTable::new()),
    }
}

fn context(matches: &ArgMatches) -> TranslationContext {
    let mut context = TranslationContext::new();
    if let Ok(Some(default)) = matches.try_get_one::<String>("default-locale") {
        context = context.with_default_locale(default);
    }
    if let Some(locale) = matches.get_one::<String>("locale") {
        context = context.with_locale(locale);
    }
    if let Ok(Some(fallback)) = matches.try_get_one::<String>("fallback-locale") {
        context = context.with_fallback_locale(fallback);
    }
    if let Ok(Some(true)) = matches.try_get_one::<bool>("no-fallbacks") {
        context = context.with_no_fallbacks(true);
    }
    context
}

fn parse_value(pair: &str) -> Result<(&str, &str), I18nError> {
    pair.split_once('=').ok_or_else(|| {
        I18nError::InvalidArgument(format!("Expected name=value, got '{}'", pair))
    })
}

fn translate(matches: &ArgMatches) -> Result<String, Box<dyn std::error::Error>> {
    let table = load(matches)?;
    let mut translator = Translator::new(Arc::new(table)).with_context(context(matches));

    if let Some(locales) = matches.get_many::<String>("plural-rules") {
        let locales: Vec<&str> = locales.map(String::as_str).collect();
        translator = translator.with_plural_rules(PluralRuleTable::with_cldr_rules(&locales)?);
    }

    let mut options = TranslateOptions::new();
    if let Some(count) = matches.get_one::<f64>("count") {
        options = options.with_count(*count);
    }
    if let Some(default) = matches.get_one::<String>("default") {
        options = options.with_default_value(default);
    }
    if let Some(prefix) = matches.get_one::<String>("scope-prefix") {
        options = options.with_scope(prefix);
    }
    for pair in matches.get_many::<String>("set").into_iter().flatten() {
        let (name, value) = parse_value(pair)?;
        options = options.with_value(name, value);
    }

    let scope = matches
        .get_one::<String>("scope")
        .ok_or_else(|| I18nError::InvalidArgument("Missing scope".to_string()))?;

    if matches.get_flag("verbose") {
        Ok(VerboseTranslator::new(translator).t(scope, &options))
    } else {
        Ok(translator.t(scope, &options))
    }
}

fn number(matches: &ArgMatches) -> Result<String, Box<dyn std::error::Error>> {
    let value = *matches
        .get_one::<f64>("value")
        .ok_or_else(|| I18nError::InvalidArgument("Missing value".to_string()))?;

    let mut format = NumberFormat::new();
    if let Some(precision) = matches.get_one::<usize>("precision") {
        format = format.with_precision(*precision);
    }
    if let Some(separator) = matches.get_one::<String>("separator") {
        format = format.with_separator(separator);
    }
    if let Some(delimiter) = matches.get_one::<String>("delimiter") {
        format = format.with_delimiter(delimiter);
    }
    if matches.get_flag("strip-zeros") {
        format = format.with_strip_insignificant_zeros(true);
    }

    if matches.get_one::<PathBuf>("data").is_some() {
        let translator = Translator::new(Arc::new(load(matches)?)).with_context(context(matches));
        Ok(translator.format_number(value, &format)?)
    } else {
        Ok(format_number(value, &format)?)
    }
}

fn human_size(matches: &ArgMatches) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = *matches
        .get_one::<f64>("bytes")
        .ok_or_else(|| I18nError::InvalidArgument("Missing byte count".to_string()))?;
    let translator = Translator::new(Arc::new(load(matches)?)).with_context(context(matches));
    Ok(translator.format_human_size(bytes, &NumberFormat::new())?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so results on stdout stay clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let matches = cli().get_matches();
    let result = match matches.subcommand() {
        Some(("translate", sub)) => translate(sub)?,
        Some(("number", sub)) => number(sub)?,
        Some(("human-size", sub)) => human_size(sub)?,
        _ => unreachable!("subcommand_required is set"),
    };
    println!("{}", result);

    Ok(())
}
