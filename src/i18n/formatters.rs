//! Locale-specific formatters for dates, numbers and currencies.
//!
//! Each `try_*` function reports failures as [`FormatError`]; the plain
//! functions never fail and degrade to a literal rendering instead.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Write as _;
use thiserror::Error;

use super::translations;
use crate::models::Locale;

const MAX_FRACTION_DIGITS: usize = 20;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid fraction digits: min {min}, max {max}")]
    InvalidFractionDigits { min: usize, max: usize },

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    #[default]
    Decimal,
    /// Multiplies by 100 and appends the locale's percent sign.
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormatOptions {
    pub style: NumberStyle,
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
    pub use_grouping: bool,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            style: NumberStyle::Decimal,
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            use_grouping: true,
        }
    }
}

impl NumberFormatOptions {
    pub fn integer() -> Self {
        Self {
            max_fraction_digits: 0,
            ..Self::default()
        }
    }

    pub fn fixed(decimals: usize) -> Self {
        Self {
            min_fraction_digits: decimals,
            max_fraction_digits: decimals,
            ..Self::default()
        }
    }

    pub fn percent(decimals: usize) -> Self {
        Self {
            style: NumberStyle::Percent,
            ..Self::fixed(decimals)
        }
    }
}

struct NumberSymbols {
    group: &'static str,
    decimal: &'static str,
    percent: &'static str,
    /// Smallest integer part length that gets grouped (es-ES leaves 1234 alone).
    min_grouping_digits: usize,
    native_digits: Option<[char; 10]>,
}

const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

fn number_symbols(locale: Locale) -> NumberSymbols {
    let western = |group, decimal, percent| NumberSymbols {
        group,
        decimal,
        percent,
        min_grouping_digits: 4,
        native_digits: None,
    };

    match locale {
        Locale::En | Locale::He | Locale::Zh | Locale::Ja => western(",", ".", "%"),
        Locale::Pt => western(".", ",", "%"),
        Locale::De => western(".", ",", "\u{a0}%"),
        Locale::Fr => western("\u{202f}", ",", "\u{202f}%"),
        Locale::Es => NumberSymbols {
            min_grouping_digits: 5,
            ..western(".", ",", "\u{a0}%")
        },
        Locale::Ar => NumberSymbols {
            group: "٬",
            decimal: "٫",
            percent: "٪",
            min_grouping_digits: 4,
            native_digits: Some(ARABIC_INDIC_DIGITS),
        },
    }
}

fn group_integer(digits: &str, separator: &str, min_grouping_digits: usize) -> String {
    if digits.len() < min_grouping_digits {
        return digits.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders `|value|` with the locale's separators; the sign is handled by callers.
fn render_magnitude(value: f64, locale: Locale, options: &NumberFormatOptions) -> String {
    let symbols = number_symbols(locale);

    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return "∞".to_string();
    }

    let fixed = format!("{:.*}", options.max_fraction_digits, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = fraction.to_string();
    while fraction.len() > options.min_fraction_digits && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut rendered = if options.use_grouping {
        group_integer(integer, symbols.group, symbols.min_grouping_digits)
    } else {
        integer.to_string()
    };
    if !fraction.is_empty() {
        rendered.push_str(symbols.decimal);
        rendered.push_str(&fraction);
    }

    match symbols.native_digits {
        Some(digits) => rendered
            .chars()
            .map(|c| c.to_digit(10).map(|d| digits[d as usize]).unwrap_or(c))
            .collect(),
        None => rendered,
    }
}

fn validate_fraction_digits(options: &NumberFormatOptions) -> Result<(), FormatError> {
    if options.min_fraction_digits > options.max_fraction_digits
        || options.max_fraction_digits > MAX_FRACTION_DIGITS
    {
        return Err(FormatError::InvalidFractionDigits {
            min: options.min_fraction_digits,
            max: options.max_fraction_digits,
        });
    }
    Ok(())
}

fn rounds_to_zero(value: f64, max_fraction_digits: usize) -> bool {
    let scale = 10f64.powi(max_fraction_digits as i32);
    (value.abs() * scale).round() == 0.0
}

/// Rounds to the given number of decimals and drops a negative zero result.
fn is_negative(value: f64, max_fraction_digits: usize) -> bool {
    value < 0.0 && !rounds_to_zero(value, max_fraction_digits)
}

/// True when `value` still reads as positive once rounded to
/// `max_fraction_digits`.
pub fn is_positive(value: f64, max_fraction_digits: usize) -> bool {
    value > 0.0 && !rounds_to_zero(value, max_fraction_digits)
}

pub fn try_format_number(
    value: f64,
    locale: Locale,
    options: &NumberFormatOptions,
) -> Result<String, FormatError> {
    validate_fraction_digits(options)?;

    let (scaled, suffix) = match options.style {
        NumberStyle::Decimal => (value, ""),
        NumberStyle::Percent => (value * 100.0, number_symbols(locale).percent),
    };

    let sign = if is_negative(scaled, options.max_fraction_digits) { "-" } else { "" };
    Ok(format!("{}{}{}", sign, render_magnitude(scaled, locale, options), suffix))
}

pub fn format_number(value: f64, locale: Locale, options: &NumberFormatOptions) -> String {
    try_format_number(value, locale, options).unwrap_or_else(|e| {
        log::warn!("Number formatting error: {}", e);
        value.to_string()
    })
}

/// `value` is already a percentage (12.5 means 12.5%).
pub fn format_percentage(value: f64, locale: Locale, decimals: usize) -> String {
    try_format_number(value / 100.0, locale, &NumberFormatOptions::percent(decimals)).unwrap_or_else(|e| {
        log::warn!("Percentage formatting error: {}", e);
        format!("{:.*}%", decimals, value)
    })
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Currency a locale uses when the caller does not name one.
pub fn preferred_currency(locale: Locale) -> &'static str {
    match locale {
        Locale::Pt => "BRL",
        Locale::En | Locale::Ar => "USD",
        Locale::Es | Locale::Fr | Locale::De => "EUR",
        Locale::He => "ILS",
        Locale::Zh => "CNY",
        Locale::Ja => "JPY",
    }
}

fn currency_symbol(code: &str, locale: Locale) -> String {
    let symbol = match (code, locale) {
        ("BRL", _) => "R$",
        ("USD", Locale::En | Locale::De | Locale::He | Locale::Ja) => "$",
        ("USD", _) => "US$",
        ("EUR", _) => "€",
        ("GBP", _) => "£",
        ("ILS", _) => "₪",
        ("CNY", Locale::Zh) => "¥",
        ("CNY", Locale::Ja) => "元",
        ("CNY", _) => "CN¥",
        ("JPY", Locale::Ja) => "￥",
        ("JPY", Locale::En) => "¥",
        ("JPY", _) => "JP¥",
        _ => code,
    };
    symbol.to_string()
}

enum CurrencyLayout {
    /// `$1.00`
    Prefix,
    /// `R$ 1,00`
    PrefixSpaced,
    /// `1,00 €`
    SuffixSpaced,
}

fn currency_layout(locale: Locale) -> CurrencyLayout {
    match locale {
        Locale::En | Locale::Zh | Locale::Ja => CurrencyLayout::Prefix,
        Locale::Pt => CurrencyLayout::PrefixSpaced,
        Locale::Es | Locale::Fr | Locale::De | Locale::Ar | Locale::He => CurrencyLayout::SuffixSpaced,
    }
}

fn normalize_currency_code(code: &str) -> Result<String, FormatError> {
    let trimmed = code.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(FormatError::InvalidCurrency(code.to_string()))
    }
}

pub fn try_format_currency(amount: f64, locale: Locale, currency: &str) -> Result<String, FormatError> {
    let code = normalize_currency_code(currency)?;
    let options = NumberFormatOptions::fixed(2);
    let number = render_magnitude(amount, locale, &options);
    let symbol = currency_symbol(&code, locale);
    let sign = if is_negative(amount, options.max_fraction_digits) { "-" } else { "" };

    Ok(match currency_layout(locale) {
        CurrencyLayout::Prefix => format!("{}{}{}", sign, symbol, number),
        CurrencyLayout::PrefixSpaced => format!("{}{}\u{a0}{}", sign, symbol, number),
        CurrencyLayout::SuffixSpaced => format!("{}{}\u{a0}{}", sign, number, symbol),
    })
}

pub fn format_currency(amount: f64, locale: Locale, currency: &str) -> String {
    try_format_currency(amount, locale, currency).unwrap_or_else(|e| {
        log::warn!("Currency formatting error: {}", e);
        format!("{} {:.2}", currency, amount)
    })
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateFormatOptions {
    /// Numeric day and year, abbreviated month.
    #[default]
    Medium,
    /// Weekday, day, month and year spelled out.
    Long,
    /// Abbreviated month and day.
    Short,
    /// Day and full month name.
    DayMonth,
    /// Full month name and year.
    MonthYear,
    Time,
    DateTime,
    /// Raw strftime pattern rendered with the locale's names.
    Pattern(String),
}

fn chrono_locale(locale: Locale) -> chrono::Locale {
    match locale {
        Locale::En => chrono::Locale::en_US,
        Locale::Pt => chrono::Locale::pt_BR,
        Locale::Es => chrono::Locale::es_ES,
        Locale::Fr => chrono::Locale::fr_FR,
        Locale::De => chrono::Locale::de_DE,
        Locale::Ar => chrono::Locale::ar_SA,
        Locale::He => chrono::Locale::he_IL,
        Locale::Zh => chrono::Locale::zh_CN,
        Locale::Ja => chrono::Locale::ja_JP,
    }
}

fn date_pattern(locale: Locale, options: &DateFormatOptions) -> String {
    use DateFormatOptions::*;
    use Locale::*;

    let pattern = match (options, locale) {
        (Pattern(custom), _) => return custom.clone(),
        (DateTime, _) => {
            return format!(
                "{}, {}",
                date_pattern(locale, &DateFormatOptions::Medium),
                date_pattern(locale, &DateFormatOptions::Time)
            );
        }

        (Medium, En) => "%b %-d, %Y",
        (Medium, Pt) => "%-d de %b de %Y",
        (Medium, De) => "%-d. %b %Y",
        (Medium, He) => "%-d ב%b %Y",
        (Medium, Zh | Ja) => "%Y年%-m月%-d日",
        (Medium, Es | Fr | Ar) => "%-d %b %Y",

        (Long, En) => "%A, %B %-d, %Y",
        (Long, Pt | Es) => "%A, %-d de %B de %Y",
        (Long, Fr) => "%A %-d %B %Y",
        (Long, De) => "%A, %-d. %B %Y",
        (Long, Ar) => "%A، %-d %B %Y",
        (Long, He) => "%A, %-d ב%B %Y",
        (Long, Zh | Ja) => "%Y年%-m月%-d日 %A",

        (Short, En) => "%b %-d",
        (Short, Pt) => "%-d de %b",
        (Short, De) => "%-d. %b",
        (Short, He) => "%-d ב%b",
        (Short, Zh | Ja) => "%-m月%-d日",
        (Short, Es | Fr | Ar) => "%-d %b",

        (DayMonth, En) => "%B %-d",
        (DayMonth, Pt | Es) => "%-d de %B",
        (DayMonth, De) => "%-d. %B",
        (DayMonth, He) => "%-d ב%B",
        (DayMonth, Zh | Ja) => "%-m月%-d日",
        (DayMonth, Fr | Ar) => "%-d %B",

        (MonthYear, Pt | Es) => "%B de %Y",
        (MonthYear, Zh | Ja) => "%Y年%-m月",
        (MonthYear, En | Fr | De | Ar | He) => "%B %Y",

        (Time, En) => "%I:%M %p",
        (Time, _) => "%H:%M",
    };
    pattern.to_string()
}

pub fn try_format_datetime(
    value: NaiveDateTime,
    locale: Locale,
    options: &DateFormatOptions,
) -> Result<String, FormatError> {
    let pattern = date_pattern(locale, options);
    let localized = value.and_utc().format_localized(&pattern, chrono_locale(locale));

    let mut rendered = String::new();
    write!(rendered, "{}", localized).map_err(|_| FormatError::InvalidPattern(pattern.clone()))?;
    Ok(rendered)
}

pub fn format_datetime(value: NaiveDateTime, locale: Locale, options: &DateFormatOptions) -> String {
    try_format_datetime(value, locale, options).unwrap_or_else(|e| {
        log::warn!("Date formatting error: {}", e);
        value.format("%Y-%m-%d").to_string()
    })
}

pub fn format_date(date: NaiveDate, locale: Locale, options: &DateFormatOptions) -> String {
    format_datetime(date.and_time(chrono::NaiveTime::MIN), locale, options)
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339.
pub fn parse_date_input(input: &str) -> Result<NaiveDateTime, FormatError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_utc())
        .map_err(|_| FormatError::InvalidDate(input.to_string()))
}

/// Unparseable input is returned as given.
pub fn format_date_str(input: &str, locale: Locale, options: &DateFormatOptions) -> String {
    match parse_date_input(input) {
        Ok(value) => format_datetime(value, locale, options),
        Err(e) => {
            log::warn!("Date formatting error: {}", e);
            input.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Relative time
// ---------------------------------------------------------------------------

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const MONTH: i64 = 2_592_000;
const YEAR: i64 = 31_536_000;

/// Future instants render like "just now". Counted buckets pick the
/// singular or plural text.
pub fn format_relative_time(value: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let elapsed = (now - value).num_seconds().max(0);

    let (key, count) = match elapsed {
        s if s < MINUTE => return translations::resolve(locale, "time.justNow").to_string(),
        s if s < HOUR => ("time.minutesAgo", s / MINUTE),
        s if s < DAY => ("time.hoursAgo", s / HOUR),
        s if s < 2 * DAY => return translations::resolve(locale, "time.yesterday").to_string(),
        s if s < MONTH => ("time.daysAgo", s / DAY),
        s if s < YEAR => ("time.monthsAgo", s / MONTH),
        s => ("time.yearsAgo", s / YEAR),
    };

    let key = translations::plural_key(key, count.unsigned_abs());
    translations::interpolate(
        translations::resolve(locale, &key),
        &[("count", count.to_string())],
    )
}

pub fn try_format_relative_str(input: &str, now: DateTime<Utc>, locale: Locale) -> Result<String, FormatError> {
    let value = parse_date_input(input)?.and_utc();
    Ok(format_relative_time(value, now, locale))
}
