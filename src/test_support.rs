//! Shared fixtures for unit tests.

use chrono::NaiveDate;

use crate::models::{DayRecord, Side, Trade};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A one-lot long whose exit price yields `pnl`.
pub fn trade(id: &str, pnl: f64) -> Trade {
    Trade {
        id: id.to_string(),
        symbol: "WINFUT".to_string(),
        side: Side::Buy,
        quantity: 1,
        entry_price: 100.0,
        exit_price: 100.0 + pnl,
        pnl,
        entry_time: "09:00:00".to_string(),
        exit_time: "09:05:00".to_string(),
        strategy: "Scalping".to_string(),
        notes: None,
    }
}

pub fn day_with_trades(day: NaiveDate, pnls: &[f64]) -> DayRecord {
    let mut record = DayRecord::empty(day);
    record.trades = pnls
        .iter()
        .enumerate()
        .map(|(i, &pnl)| trade(&format!("{}-{}", day, i), pnl))
        .collect();
    record.recompute_pnl();
    record
}
