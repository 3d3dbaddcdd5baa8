use std::path::PathBuf;

use crate::models::Locale;

const APP_DIR_NAME: &str = "quant-diary";

pub const ENV_DATA_DIR: &str = "QUANT_DIARY_DATA_DIR";
pub const ENV_LOCALE: &str = "QUANT_DIARY_LOCALE";
pub const ENV_CURRENCY: &str = "QUANT_DIARY_CURRENCY";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub database_file: String,
    /// `None` means detect from the environment.
    pub default_locale: Option<Locale>,
    /// `None` means the active locale's preferred currency.
    pub default_currency: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: "quant_diary.db".to_string(),
            default_locale: Some(Locale::Pt),
            default_currency: Some("BRL".to_string()),
        }
    }
}

/// `<platform data dir>/quant-diary`, or `./.quant-diary` when the platform has none.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR_NAME)))
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `QUANT_DIARY_*` variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(ENV_LOCALE) {
            let value = value.trim();
            if value.is_empty() {
                config.default_locale = None;
            } else {
                match value.parse::<Locale>() {
                    Ok(locale) => config.default_locale = Some(locale),
                    Err(e) => log::warn!("Ignoring {}: {}", ENV_LOCALE, e),
                }
            }
        }

        if let Some(value) = lookup(ENV_CURRENCY) {
            let value = value.trim();
            config.default_currency = if value.is_empty() {
                None
            } else {
                Some(value.to_ascii_uppercase())
            };
        }

        config
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.database_file, "quant_diary.db");
        assert_eq!(config.default_locale, Some(Locale::Pt));
        assert_eq!(config.default_currency.as_deref(), Some("BRL"));
        assert!(config.data_dir.ends_with("quant-diary") || config.data_dir.ends_with(".quant-diary"));
    }

    #[test]
    fn test_env_overrides() {
        let config = config_from(&[
            (ENV_DATA_DIR, "/tmp/diary"),
            (ENV_LOCALE, "ja"),
            (ENV_CURRENCY, "usd"),
        ]);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/diary/quant_diary.db"));
        assert_eq!(config.default_locale, Some(Locale::Ja));
        assert_eq!(config.default_currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_empty_values_clear_defaults() {
        let config = config_from(&[(ENV_LOCALE, ""), (ENV_CURRENCY, " ")]);
        assert_eq!(config.default_locale, None);
        assert_eq!(config.default_currency, None);
    }

    #[test]
    fn test_unsupported_locale_keeps_default() {
        let config = config_from(&[(ENV_LOCALE, "klingon")]);
        assert_eq!(config.default_locale, Some(Locale::Pt));
    }
}
