use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DiaryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Pt,
    Es,
    Fr,
    De,
    Ar,
    He,
    Zh,
    Ja,
}

impl Locale {
    pub const ALL: [Locale; 9] = [
        Locale::En,
        Locale::Pt,
        Locale::Es,
        Locale::Fr,
        Locale::De,
        Locale::Ar,
        Locale::He,
        Locale::Zh,
        Locale::Ja,
    ];

    pub const RTL: [Locale; 2] = [Locale::Ar, Locale::He];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Ar => "ar",
            Locale::He => "he",
            Locale::Zh => "zh",
            Locale::Ja => "ja",
        }
    }

    /// BCP 47 tag with the region used for formatting conventions.
    pub fn language_tag(&self) -> &'static str {
        match self {
            Locale::En => "en-US",
            Locale::Pt => "pt-BR",
            Locale::Es => "es-ES",
            Locale::Fr => "fr-FR",
            Locale::De => "de-DE",
            Locale::Ar => "ar-SA",
            Locale::He => "he-IL",
            Locale::Zh => "zh-CN",
            Locale::Ja => "ja-JP",
        }
    }

    pub fn is_rtl(&self) -> bool {
        Self::RTL.contains(self)
    }

    /// Accepts a bare code (`pt`) or a tag such as `pt-BR`, `pt_BR.UTF-8`.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::ALL.iter().copied().find(|l| l.code() == primary)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = DiaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.code() == s)
            .ok_or_else(|| DiaryError::UnsupportedLocale(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleState {
    pub locale: Locale,
    #[serde(rename = "isRTL")]
    pub is_rtl: bool,
}

impl LocaleState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            is_rtl: locale.is_rtl(),
        }
    }

    pub fn direction(&self) -> TextDirection {
        if self.is_rtl {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

/// The persisted subset of the locale state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLocale {
    pub locale: Locale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_codes() {
        for locale in Locale::ALL {
            assert_eq!(locale.code().parse::<Locale>().unwrap(), locale);
        }
        assert!("pt-BR".parse::<Locale>().is_err());
        assert!("xx".parse::<Locale>().is_err());
    }

    #[test]
    fn test_from_tag_strips_region_and_encoding() {
        assert_eq!(Locale::from_tag("pt_BR.UTF-8"), Some(Locale::Pt));
        assert_eq!(Locale::from_tag("he-IL"), Some(Locale::He));
        assert_eq!(Locale::from_tag("C"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn test_rtl_membership() {
        let rtl: Vec<Locale> = Locale::ALL.iter().copied().filter(|l| l.is_rtl()).collect();
        assert_eq!(rtl, vec![Locale::Ar, Locale::He]);
        assert!(LocaleState::new(Locale::Ar).is_rtl);
        assert_eq!(LocaleState::new(Locale::En).direction(), TextDirection::Ltr);
    }

    #[test]
    fn test_persisted_locale_json() {
        let json = serde_json::to_string(&PersistedLocale { locale: Locale::Ar }).unwrap();
        assert_eq!(json, r#"{"locale":"ar"}"#);
    }
}
