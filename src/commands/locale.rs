use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::i18n::formatters::{DateFormatOptions, NumberFormatOptions};
use crate::i18n::translations::{self, CoverageReport};
use crate::models::{Locale, LocaleState, TextDirection};
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub code: Locale,
    /// Name in the active locale.
    pub name: String,
    /// Name in the locale itself.
    pub native_name: String,
    #[serde(rename = "isRTL")]
    pub is_rtl: bool,
    pub direction: TextDirection,
}

pub fn get_locale_state(state: &AppState) -> Result<LocaleState, String> {
    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    Ok(locale.state())
}

pub fn set_locale(state: &AppState, locale: String) -> Result<LocaleState, String> {
    let mut store = state.locale.lock().map_err(|e| e.to_string())?;
    store.set_locale(&locale).map_err(|e| e.to_string())
}

/// Translates `key`, picking the singular or plural form when `count` is given.
pub fn translate(
    state: &AppState,
    key: String,
    params: Option<HashMap<String, String>>,
    count: Option<usize>,
) -> Result<String, String> {
    let locale = state.locale.lock().map_err(|e| e.to_string())?;

    let params: Vec<(&str, String)> = params
        .iter()
        .flatten()
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect();

    Ok(match count {
        Some(count) => locale.pluralize(&key, count, &params),
        None => locale.translate(&key, &params),
    })
}

pub fn list_locales(state: &AppState) -> Result<Vec<LocaleInfo>, String> {
    let store = state.locale.lock().map_err(|e| e.to_string())?;

    Ok(Locale::ALL
        .iter()
        .map(|&locale| LocaleInfo {
            code: locale,
            name: store.display_name(locale),
            native_name: crate::i18n::display_name(locale, locale),
            is_rtl: locale.is_rtl(),
            direction: LocaleState::new(locale).direction(),
        })
        .collect())
}

/// Missing and extra keys of every locale against English.
pub fn translation_report(_state: &AppState) -> Result<BTreeMap<Locale, CoverageReport>, String> {
    let report = translations::coverage_report();
    for (locale, coverage) in &report {
        if !coverage.missing.is_empty() {
            log::debug!("Locale {} is missing {} keys", locale, coverage.missing.len());
        }
    }
    Ok(report)
}

pub fn format_currency(state: &AppState, amount: f64, currency: Option<String>) -> Result<String, String> {
    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    Ok(locale.format_currency(amount, currency.as_deref()))
}

/// Accepts the named styles (`medium`, `long`, `short`, `dayMonth`,
/// `monthYear`, `time`, `dateTime`); anything else is a strftime pattern.
pub fn format_date(state: &AppState, date: String, style: Option<String>) -> Result<String, String> {
    let options = match style.as_deref() {
        None | Some("medium") => DateFormatOptions::Medium,
        Some("long") => DateFormatOptions::Long,
        Some("short") => DateFormatOptions::Short,
        Some("dayMonth") => DateFormatOptions::DayMonth,
        Some("monthYear") => DateFormatOptions::MonthYear,
        Some("time") => DateFormatOptions::Time,
        Some("dateTime") => DateFormatOptions::DateTime,
        Some(pattern) => DateFormatOptions::Pattern(pattern.to_string()),
    };

    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    Ok(locale.format_date_str(&date, &options))
}

pub fn format_number(
    state: &AppState,
    value: f64,
    min_fraction_digits: Option<usize>,
    max_fraction_digits: Option<usize>,
) -> Result<String, String> {
    let defaults = NumberFormatOptions::default();
    let min = min_fraction_digits.unwrap_or(defaults.min_fraction_digits);
    let options = NumberFormatOptions {
        min_fraction_digits: min,
        max_fraction_digits: max_fraction_digits.unwrap_or(defaults.max_fraction_digits.max(min)),
        ..defaults
    };

    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    Ok(locale.format_number(value, &options))
}
