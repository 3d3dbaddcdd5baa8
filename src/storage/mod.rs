//! Key-value persistence boundary.
//!
//! Everything the journal persists goes through [`KeyValueStore`] as whole
//! JSON documents under a handful of fixed keys, the same shape browser
//! local storage gives a web front end.

mod memory;
mod sqlite;

pub use memory::MemoryStore;

use crate::error::Result;

/// Key holding the persisted locale preference.
pub const LOCALE_KEY: &str = "i18n-storage";

/// Key holding the whole diary map.
pub const DIARY_KEY: &str = "quantDiary";

pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;
}
