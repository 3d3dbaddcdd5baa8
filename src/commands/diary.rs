use crate::diary::stats::{self, EquityPoint, MonthBreakdown};
use crate::diary::{CalendarDay, DayEditor, EditorMode, MonthlyStats};
use crate::error::DiaryError;
use crate::models::{DayRecord, TradeDraft};
use crate::AppState;

use super::{parse_date, parse_month};

/// The stored day, or an empty one when nothing was journaled yet.
pub fn get_day(state: &AppState, date: String) -> Result<DayRecord, String> {
    let date = parse_date(&date)?;
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    Ok(diary.day(date))
}

/// Stores `record` under its date and returns it with its pnl recomputed.
pub fn save_day(state: &AppState, record: DayRecord) -> Result<DayRecord, String> {
    let mut diary = state.diary.lock().map_err(|e| e.to_string())?;
    diary.save(record).map_err(|e| e.to_string())
}

/// Adds a trade from the add-trade form to `date` and saves the day.
pub fn add_trade(state: &AppState, date: String, draft: TradeDraft) -> Result<DayRecord, String> {
    let date = parse_date(&date)?;
    let mut diary = state.diary.lock().map_err(|e| e.to_string())?;

    let mut editor = DayEditor::new(diary.day(date), EditorMode::Editing);
    if editor.add_trade(draft).is_none() {
        return Err(DiaryError::InvalidTrade("entry and exit prices are required".to_string()).to_string());
    }
    editor.save(&mut diary).map_err(|e| e.to_string())
}

pub fn delete_trade(state: &AppState, date: String, id: String) -> Result<DayRecord, String> {
    let date = parse_date(&date)?;
    let mut diary = state.diary.lock().map_err(|e| e.to_string())?;

    let mut editor = DayEditor::new(diary.day(date), EditorMode::Editing);
    if !editor.delete_trade(&id) {
        return Err(DiaryError::InvalidTrade(format!("no trade {} on {}", id, date)).to_string());
    }
    editor.save(&mut diary).map_err(|e| e.to_string())
}

pub fn get_calendar(state: &AppState, year: i32, month: u32) -> Result<Vec<CalendarDay>, String> {
    let month = parse_month(year, month)?;
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    Ok(crate::diary::derive_calendar(month, diary.entries()))
}

pub fn get_monthly_stats(state: &AppState, year: i32, month: u32) -> Result<MonthlyStats, String> {
    let month = parse_month(year, month)?;
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    Ok(stats::monthly_stats(month, diary.entries()))
}

pub fn get_accumulated_stats(state: &AppState) -> Result<MonthlyStats, String> {
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    Ok(stats::accumulated_stats(diary.entries()))
}

pub fn get_monthly_breakdown(state: &AppState, year: i32) -> Result<Vec<MonthBreakdown>, String> {
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    Ok(stats::monthly_breakdown(year, diary.entries()))
}

pub fn get_equity_curve(state: &AppState) -> Result<Vec<EquityPoint>, String> {
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    Ok(stats::equity_curve(diary.entries()))
}
