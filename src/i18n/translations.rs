//! Translation dictionaries for every supported locale.
//!
//! Dictionaries ship inside the binary as flat `key -> text` JSON documents
//! and are parsed once on first use. English is the base dictionary every
//! other locale falls back to.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::Locale;

pub const BASE_LOCALE: Locale = Locale::En;

type Dictionary = HashMap<String, String>;

fn source(locale: Locale) -> &'static str {
    match locale {
        Locale::En => include_str!("locales/en.json"),
        Locale::Pt => include_str!("locales/pt.json"),
        Locale::Es => include_str!("locales/es.json"),
        Locale::Fr => include_str!("locales/fr.json"),
        Locale::De => include_str!("locales/de.json"),
        Locale::Ar => include_str!("locales/ar.json"),
        Locale::He => include_str!("locales/he.json"),
        Locale::Zh => include_str!("locales/zh.json"),
        Locale::Ja => include_str!("locales/ja.json"),
    }
}

static DICTIONARIES: Lazy<HashMap<Locale, Dictionary>> = Lazy::new(|| {
    Locale::ALL
        .iter()
        .map(|&locale| {
            let dictionary = serde_json::from_str::<Dictionary>(source(locale)).unwrap_or_else(|e| {
                log::error!("Translation dictionary for {} is invalid: {}", locale, e);
                Dictionary::new()
            });
            (locale, dictionary)
        })
        .collect()
});

/// Exact lookup in one dictionary. Empty texts count as missing.
pub fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    DICTIONARIES
        .get(&locale)
        .and_then(|d| d.get(key))
        .map(String::as_str)
        .filter(|text| !text.is_empty())
}

/// Active locale, then the base locale, then the key itself.
pub fn resolve<'a>(locale: Locale, key: &'a str) -> &'a str {
    lookup(locale, key)
        .or_else(|| lookup(BASE_LOCALE, key))
        .unwrap_or(key)
}

/// `<key>.singular` for a count of one, `<key>.plural` otherwise.
pub fn plural_key(key: &str, count: u64) -> String {
    let form = if count == 1 { "singular" } else { "plural" };
    format!("{}.{}", key, form)
}

/// Replaces every `{{name}}` placeholder with its value.
pub fn interpolate(text: &str, params: &[(&str, String)]) -> String {
    params.iter().fold(text.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{{{}}}}}", name), value)
    })
}

pub fn base_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = DICTIONARIES
        .get(&BASE_LOCALE)
        .map(|d| d.keys().map(String::as_str).collect())
        .unwrap_or_default();
    keys.sort_unstable();
    keys
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Base keys the locale does not translate (served from English).
    pub missing: Vec<String>,
    /// Keys the locale has that the base dictionary does not.
    pub extra: Vec<String>,
}

/// Completeness of every non-base locale against the base dictionary.
pub fn coverage_report() -> BTreeMap<Locale, CoverageReport> {
    let Some(base) = DICTIONARIES.get(&BASE_LOCALE) else {
        return BTreeMap::new();
    };

    Locale::ALL
        .iter()
        .filter(|&&locale| locale != BASE_LOCALE)
        .map(|&locale| {
            let empty = Dictionary::new();
            let dictionary = DICTIONARIES.get(&locale).unwrap_or(&empty);

            let mut missing: Vec<String> = base
                .keys()
                .filter(|k| lookup(locale, k).is_none())
                .cloned()
                .collect();
            let mut extra: Vec<String> = dictionary
                .keys()
                .filter(|k| !base.contains_key(*k))
                .cloned()
                .collect();
            missing.sort();
            extra.sort();

            (locale, CoverageReport { missing, extra })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dictionary_parses_without_empty_values() {
        for locale in Locale::ALL {
            let raw: Dictionary = serde_json::from_str(source(locale))
                .unwrap_or_else(|e| panic!("{} dictionary is invalid: {}", locale, e));
            assert!(!raw.is_empty(), "{} dictionary is empty", locale);
            for (key, text) in raw {
                assert!(!text.is_empty(), "{}:{} is empty", locale, key);
            }
        }
    }

    #[test]
    fn test_resolve_falls_back_to_base_then_key() {
        assert_eq!(resolve(Locale::Pt, "action.save"), "Salvar");
        // Hebrew has no label for best day, English does
        assert_eq!(resolve(Locale::He, "diary.stats.bestDay"), "Best day");
        assert_eq!(resolve(Locale::Ja, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_every_base_key_resolves_to_text_in_every_locale() {
        for locale in Locale::ALL {
            for key in base_keys() {
                let text = resolve(locale, key);
                assert!(!text.is_empty());
                assert_ne!(text, key, "{} should resolve {}", locale, key);
            }
        }
    }

    #[test]
    fn test_interpolate_replaces_all_occurrences() {
        let text = "{{count}} of {{count}} by {{name}}";
        let result = interpolate(text, &[("count", "3".to_string()), ("name", "Ana".to_string())]);
        assert_eq!(result, "3 of 3 by Ana");

        // Unknown placeholders are left alone
        assert_eq!(interpolate("{{other}}", &[("count", "1".to_string())]), "{{other}}");
    }

    #[test]
    fn test_coverage_report() {
        let report = coverage_report();
        assert_eq!(report.len(), Locale::ALL.len() - 1);
        assert!(!report.contains_key(&Locale::En));

        let pt = &report[&Locale::Pt];
        assert!(pt.missing.is_empty(), "pt is complete: {:?}", pt.missing);
        assert!(pt.extra.is_empty());

        let he = &report[&Locale::He];
        assert!(he.missing.contains(&"diary.stats.bestDay".to_string()));
    }
}
