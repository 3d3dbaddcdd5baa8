pub mod backup;
pub mod commands;
pub mod config;
pub mod db;
pub mod diary;
pub mod error;
pub mod i18n;
pub mod models;
pub mod storage;
pub mod views;

#[cfg(test)]
mod test_support;

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::diary::DiaryStore;
use crate::error::Result;
use crate::i18n::LocaleStore;
use crate::models::Locale;
use crate::storage::KeyValueStore;

/// Everything a host shares between command calls.
pub struct AppState {
    pub config: AppConfig,
    pub locale: Mutex<LocaleStore>,
    pub diary: Mutex<DiaryStore>,
    storage: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Opens (and migrates) the SQLite database under the configured data
    /// directory, creating the directory when needed.
    pub fn open(config: AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let db_path = config.database_path();
        log::info!("Database path: {:?}", db_path);

        let database = match db::Database::new(&db_path.to_string_lossy()) {
            Ok(db) => db,
            Err(e) => {
                log::error!("Database initialization failed: {}", e);
                log::error!("Backups are located at {:?}", config.data_dir.join("backups"));
                return Err(e.into());
            }
        };

        let system_locale = i18n::detect_system_locale(|var| std::env::var(var).ok());
        Ok(Self::with_storage(config, Arc::new(database), system_locale))
    }

    pub fn with_storage(
        config: AppConfig,
        storage: Arc<dyn KeyValueStore>,
        system_locale: Option<Locale>,
    ) -> Self {
        let locale = LocaleStore::load(
            storage.clone(),
            config.default_locale,
            system_locale,
            config.default_currency.clone(),
        );
        let diary = DiaryStore::load(storage.clone());

        Self {
            config,
            locale: Mutex::new(locale),
            diary: Mutex::new(diary),
            storage,
        }
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DIARY_KEY, LOCALE_KEY};
    use crate::test_support::{date, day_with_trades, init_logging};

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            data_dir: dir.join("nested").join("data"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_open_creates_data_dir_and_database() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let state = AppState::open(config.clone()).unwrap();
        assert!(config.database_path().exists());
        assert_eq!(state.locale.lock().unwrap().locale(), Locale::Pt);
        assert!(state.diary.lock().unwrap().entries().is_empty());
    }

    #[test]
    fn test_state_survives_reopen() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        {
            let state = AppState::open(config.clone()).unwrap();
            state.locale.lock().unwrap().set_locale("ar").unwrap();
            state
                .diary
                .lock()
                .unwrap()
                .save(day_with_trades(date(2024, 3, 5), &[20.0]))
                .unwrap();
        }

        let state = AppState::open(config).unwrap();
        let locale = state.locale.lock().unwrap();
        assert_eq!(locale.locale(), Locale::Ar);
        assert!(locale.is_rtl());
        assert_eq!(state.diary.lock().unwrap().get(date(2024, 3, 5)).unwrap().pnl, 20.0);
        assert!(state.storage().get_item(LOCALE_KEY).unwrap().is_some());
        assert!(state.storage().get_item(DIARY_KEY).unwrap().is_some());
    }

    #[test]
    fn test_system_locale_used_without_default() {
        let config = AppConfig {
            default_locale: None,
            ..AppConfig::default()
        };
        let state = AppState::with_storage(
            config,
            Arc::new(crate::storage::MemoryStore::new()),
            Some(Locale::Ja),
        );
        assert_eq!(state.locale.lock().unwrap().locale(), Locale::Ja);
    }
}
