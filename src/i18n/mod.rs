//! Locale store: the active locale, translation lookup and formatting.

pub mod document;
pub mod formatters;
pub mod rtl;
pub mod translations;

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Locale, LocaleState, PersistedLocale, TextDirection};
use crate::storage::{KeyValueStore, LOCALE_KEY};
use document::DocumentHost;
use formatters::{DateFormatOptions, NumberFormatOptions};

/// Environment variables consulted for the system locale, in priority order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// First supported locale named by `LC_ALL`, `LC_MESSAGES` or `LANG`.
///
/// `lookup` resolves an environment variable; values such as `C` or
/// `POSIX` name no supported locale and are skipped.
pub fn detect_system_locale(lookup: impl Fn(&str) -> Option<String>) -> Option<Locale> {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|&var| lookup(var))
        .filter(|value| !value.trim().is_empty())
        .find_map(|value| Locale::from_tag(value.trim()))
}

/// Name of `locale` written in `in_locale`, or the upper-cased code.
pub fn display_name(locale: Locale, in_locale: Locale) -> String {
    translations::lookup(in_locale, &format!("locale.{}", locale.code()))
        .map(str::to_string)
        .unwrap_or_else(|| locale.code().to_uppercase())
}

pub struct LocaleStore {
    state: LocaleState,
    default_currency: Option<String>,
    storage: Arc<dyn KeyValueStore>,
    document: Option<Box<dyn DocumentHost>>,
}

impl LocaleStore {
    /// Restores the persisted locale, falling back to `default_locale`,
    /// then `system_locale`, then English.
    pub fn load(
        storage: Arc<dyn KeyValueStore>,
        default_locale: Option<Locale>,
        system_locale: Option<Locale>,
        default_currency: Option<String>,
    ) -> Self {
        let persisted = Self::read_persisted(storage.as_ref());
        let locale = persisted
            .or(default_locale)
            .or(system_locale)
            .unwrap_or(translations::BASE_LOCALE);

        log::info!(
            "Locale initialized to {} (persisted: {})",
            locale,
            persisted.is_some()
        );

        Self {
            state: LocaleState::new(locale),
            default_currency,
            storage,
            document: None,
        }
    }

    fn read_persisted(storage: &dyn KeyValueStore) -> Option<Locale> {
        let raw = match storage.get_item(LOCALE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to read persisted locale: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<PersistedLocale>(&raw) {
            Ok(persisted) => Some(persisted.locale),
            Err(e) => {
                log::warn!("Ignoring persisted locale {:?}: {}", raw, e);
                None
            }
        }
    }

    /// Attaches the document the locale is mirrored to and applies the current locale.
    pub fn attach_document(&mut self, mut host: Box<dyn DocumentHost>) {
        document::apply_locale(host.as_mut(), self.state.locale);
        self.document = Some(host);
    }

    pub fn document(&self) -> Option<&dyn DocumentHost> {
        self.document.as_deref()
    }

    pub fn state(&self) -> LocaleState {
        self.state
    }

    pub fn locale(&self) -> Locale {
        self.state.locale
    }

    pub fn is_rtl(&self) -> bool {
        self.state.is_rtl
    }

    pub fn direction(&self) -> TextDirection {
        self.state.direction()
    }

    /// Switches to `code`. Unsupported codes leave the state untouched.
    pub fn set_locale(&mut self, code: &str) -> Result<LocaleState> {
        let locale: Locale = code.parse()?;

        let persisted = serde_json::to_string(&PersistedLocale { locale })?;
        self.storage.set_item(LOCALE_KEY, &persisted)?;

        self.state = LocaleState::new(locale);
        if let Some(host) = self.document.as_mut() {
            document::apply_locale(host.as_mut(), locale);
        }

        log::info!("Locale changed to {} ({})", locale, self.state.direction().as_str());
        Ok(self.state)
    }

    pub fn t(&self, key: &str) -> String {
        translations::resolve(self.state.locale, key).to_string()
    }

    pub fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        translations::interpolate(translations::resolve(self.state.locale, key), params)
    }

    /// Resolves `<key>.singular` or `<key>.plural` and injects `count`.
    pub fn pluralize(&self, key: &str, count: usize, params: &[(&str, String)]) -> String {
        let mut all = vec![("count", count.to_string())];
        all.extend(params.iter().cloned());
        self.translate(&translations::plural_key(key, count as u64), &all)
    }

    pub fn display_name(&self, locale: Locale) -> String {
        display_name(locale, self.state.locale)
    }

    /// Currency used when a caller does not name one.
    pub fn currency(&self) -> String {
        self.default_currency
            .clone()
            .unwrap_or_else(|| formatters::preferred_currency(self.state.locale).to_string())
    }

    pub fn format_date(&self, date: NaiveDate, options: &DateFormatOptions) -> String {
        formatters::format_date(date, self.state.locale, options)
    }

    pub fn format_date_str(&self, input: &str, options: &DateFormatOptions) -> String {
        formatters::format_date_str(input, self.state.locale, options)
    }

    pub fn format_number(&self, value: f64, options: &NumberFormatOptions) -> String {
        formatters::format_number(value, self.state.locale, options)
    }

    pub fn format_currency(&self, amount: f64, currency: Option<&str>) -> String {
        match currency {
            Some(code) => formatters::format_currency(amount, self.state.locale, code),
            None => formatters::format_currency(amount, self.state.locale, &self.currency()),
        }
    }

    pub fn format_percentage(&self, value: f64, decimals: usize) -> String {
        formatters::format_percentage(value, self.state.locale, decimals)
    }

    pub fn format_relative_time(&self, value: DateTime<Utc>) -> String {
        self.format_relative_time_at(value, Utc::now())
    }

    pub fn format_relative_time_at(&self, value: DateTime<Utc>, now: DateTime<Utc>) -> String {
        formatters::format_relative_time(value, now, self.state.locale)
    }
}
