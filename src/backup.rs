//! Whole-diary JSON backups and the flat trade CSV export.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::diary::{DiaryData, DiaryStore};
use crate::error::{DiaryError, Result};
use crate::i18n::LocaleStore;
use crate::models::{Locale, Side};

pub const BACKUP_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryBackup {
    pub entries: DiaryData,
    /// Plain text; codes this build does not know are skipped on import.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub version: String,
}

/// Pretty-printed JSON of the whole diary and the active locale.
pub fn export_diary(diary: &DiaryStore, locale: Locale, now: DateTime<Utc>) -> Result<String> {
    let backup = DiaryBackup {
        entries: diary.entries().clone(),
        locale: Some(locale.code().to_string()),
        export_date: now.to_rfc3339(),
        version: BACKUP_VERSION.to_string(),
    };

    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Replaces the diary with the backup's entries and, when it names a
/// supported one, switches to the backup's locale. Returns the number of
/// imported days.
///
/// A backup that does not parse changes nothing.
pub fn import_diary(json: &str, diary: &mut DiaryStore, locale: &mut LocaleStore) -> Result<usize> {
    let backup: DiaryBackup = serde_json::from_str(json)?;
    log::info!(
        "Importing diary backup version {} from {} ({} days)",
        if backup.version.is_empty() { "unknown" } else { backup.version.as_str() },
        if backup.export_date.is_empty() { "unknown date" } else { backup.export_date.as_str() },
        backup.entries.len()
    );

    let days = diary.replace_all(backup.entries)?;

    if let Some(code) = backup.locale {
        match locale.set_locale(&code) {
            Ok(_) => {}
            Err(DiaryError::UnsupportedLocale(code)) => {
                log::warn!("Backup locale {} is not supported, keeping {}", code, locale.locale());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(days)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TradeCsvRow<'a> {
    date: NaiveDate,
    id: &'a str,
    symbol: &'a str,
    side: Side,
    quantity: u32,
    entry_price: f64,
    exit_price: f64,
    pnl: f64,
    entry_time: &'a str,
    exit_time: &'a str,
    strategy: &'a str,
    notes: &'a str,
}

/// One row per trade, ordered by day and then by entry order.
pub fn export_trades_csv(diary: &DiaryData) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for record in diary.values() {
        for trade in &record.trades {
            writer.serialize(TradeCsvRow {
                date: record.date,
                id: &trade.id,
                symbol: &trade.symbol,
                side: trade.side,
                quantity: trade.quantity,
                entry_price: trade.entry_price,
                exit_price: trade.exit_price,
                pnl: trade.pnl,
                entry_time: &trade.entry_time,
                exit_time: &trade.exit_time,
                strategy: &trade.strategy,
                notes: trade.notes.as_deref().unwrap_or_default(),
            })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DiaryError::ExportError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DiaryError::ExportError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::test_support::{date, day_with_trades};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn stores() -> (DiaryStore, LocaleStore) {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        (
            DiaryStore::load(storage.clone()),
            LocaleStore::load(storage, Some(Locale::Pt), None, None),
        )
    }

    #[test]
    fn test_export_then_import_restores_diary() {
        let (mut diary, locale) = stores();
        let mut record = day_with_trades(date(2024, 3, 5), &[20.0]);
        record.mood = Mood::Good;
        diary.save(record).unwrap();
        diary.save(day_with_trades(date(2024, 3, 6), &[-4.5, 1.25])).unwrap();

        let now = Utc.with_ymd_and_hms(2024, 3, 31, 18, 0, 0).unwrap();
        let json = export_diary(&diary, Locale::He, now).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["locale"], "he");
        assert_eq!(value["exportDate"], "2024-03-31T18:00:00+00:00");
        assert_eq!(value["entries"]["2024-03-05"]["mood"], "good");

        let (mut restored, mut restored_locale) = stores();
        assert_eq!(import_diary(&json, &mut restored, &mut restored_locale).unwrap(), 2);
        assert_eq!(restored.entries(), diary.entries());
        assert_eq!(restored_locale.locale(), Locale::He);
        assert_eq!(locale.locale(), Locale::Pt);
    }

    #[test]
    fn test_import_with_unknown_locale_keeps_current() {
        let (mut diary, mut locale) = stores();
        let json = r#"{"entries":{"2024-03-05":{"date":"2024-03-05"}},"locale":"tlh"}"#;

        assert_eq!(import_diary(json, &mut diary, &mut locale).unwrap(), 1);
        assert_eq!(locale.locale(), Locale::Pt);
    }

    #[test]
    fn test_malformed_backup_changes_nothing() {
        let (mut diary, mut locale) = stores();
        diary.save(day_with_trades(date(2024, 3, 5), &[20.0])).unwrap();

        let err = import_diary(r#"{"entries": 42}"#, &mut diary, &mut locale).unwrap_err();
        assert!(matches!(err, DiaryError::ParseError(_)));
        assert_eq!(diary.entries().len(), 1);
    }

    #[test]
    fn test_trades_csv() {
        let mut diary = DiaryData::new();
        let mut later = day_with_trades(date(2024, 3, 6), &[-2.0]);
        later.trades[0].notes = Some("stopped, out".to_string());
        diary.insert(later.date, later);
        diary.insert(date(2024, 3, 5), day_with_trades(date(2024, 3, 5), &[20.0, 5.0]));

        let csv = export_trades_csv(&diary).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "date,id,symbol,side,quantity,entryPrice,exitPrice,pnl,entryTime,exitTime,strategy,notes"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("2024-03-05,2024-03-05-0,WINFUT,buy,1,100.0,120.0,20.0,"));
        assert!(lines[3].starts_with("2024-03-06,"));
        assert!(lines[3].ends_with(",Scalping,\"stopped, out\""));
    }

    #[test]
    fn test_empty_diary_csv_is_empty() {
        assert_eq!(export_trades_csv(&DiaryData::new()).unwrap(), "");
    }
}
