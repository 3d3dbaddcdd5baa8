use chrono::NaiveDate;
use std::sync::Arc;

use super::DiaryData;
use crate::error::Result;
use crate::models::DayRecord;
use crate::storage::{KeyValueStore, DIARY_KEY};

/// The diary map, mirrored to storage as one JSON object keyed by date.
///
/// Every write serializes the whole map; concurrent writers overwrite
/// each other.
pub struct DiaryStore {
    entries: DiaryData,
    storage: Arc<dyn KeyValueStore>,
}

impl DiaryStore {
    /// Never fails: unreadable or malformed data starts an empty diary.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let entries = read_entries(storage.as_ref());
        log::info!("Loaded diary with {} days", entries.len());
        Self { entries, storage }
    }

    pub fn reload(&mut self) {
        self.entries = read_entries(self.storage.as_ref());
    }

    pub fn entries(&self) -> &DiaryData {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.entries.get(&date)
    }

    /// The stored record, or a fresh one that is not persisted until saved.
    pub fn day(&self, date: NaiveDate) -> DayRecord {
        self.entries
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DayRecord::empty(date))
    }

    /// Merges `record` by date and writes the whole diary back.
    ///
    /// Trades without a quantity or usable prices reject the whole record;
    /// every trade pnl is re-derived. On a storage failure the in-memory
    /// diary keeps its previous state.
    pub fn save(&mut self, mut record: DayRecord) -> Result<DayRecord> {
        if let Err(e) = record.settle_trades() {
            log::warn!("Rejected diary day {}: {}", record.date, e);
            return Err(e);
        }

        let previous = self.entries.insert(record.date, record.clone());
        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.entries.insert(record.date, old),
                None => self.entries.remove(&record.date),
            };
            log::error!("Failed to save diary day {}: {}", record.date, e);
            return Err(e);
        }

        log::debug!(
            "Saved diary day {} ({} trades, pnl {:.2})",
            record.date,
            record.trades.len(),
            record.pnl
        );
        Ok(record)
    }

    /// Swaps in a whole diary, as a backup import does. Any unusable trade
    /// rejects the whole replacement.
    pub fn replace_all(&mut self, mut entries: DiaryData) -> Result<usize> {
        normalize(&mut entries);
        for record in entries.values_mut() {
            record.settle_trades()?;
        }

        let previous = std::mem::replace(&mut self.entries, entries);
        if let Err(e) = self.persist() {
            self.entries = previous;
            return Err(e);
        }

        log::info!("Replaced diary with {} days", self.entries.len());
        Ok(self.entries.len())
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.storage.set_item(DIARY_KEY, &json)
    }
}

fn read_entries(storage: &dyn KeyValueStore) -> DiaryData {
    let raw = match storage.get_item(DIARY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return DiaryData::new(),
        Err(e) => {
            log::warn!("Failed to read diary, starting empty: {}", e);
            return DiaryData::new();
        }
    };

    match serde_json::from_str::<DiaryData>(&raw) {
        Ok(mut entries) => {
            normalize(&mut entries);
            entries
        }
        Err(e) => {
            log::warn!("Stored diary is malformed, starting empty: {}", e);
            DiaryData::new()
        }
    }
}

/// Keys win over embedded dates; pnl is always re-derived from trades.
fn normalize(entries: &mut DiaryData) {
    for (date, record) in entries.iter_mut() {
        if record.date != *date {
            log::debug!("Diary record under {} claimed date {}", date, record.date);
            record.date = *date;
        }
        if record.recompute_pnl() {
            log::debug!("Re-derived pnl for {}", date);
        }
    }
}
