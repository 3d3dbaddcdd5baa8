use chrono::Utc;

use crate::backup;
use crate::AppState;

/// The whole diary and the active locale as pretty-printed JSON.
pub fn export_diary(state: &AppState) -> Result<String, String> {
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    backup::export_diary(&diary, locale.locale(), Utc::now()).map_err(|e| e.to_string())
}

/// Replaces the diary with the backup. Returns the number of imported days.
pub fn import_diary(state: &AppState, json: String) -> Result<usize, String> {
    let mut diary = state.diary.lock().map_err(|e| e.to_string())?;
    let mut locale = state.locale.lock().map_err(|e| e.to_string())?;
    backup::import_diary(&json, &mut diary, &mut locale).map_err(|e| e.to_string())
}

pub fn export_trades_csv(state: &AppState) -> Result<String, String> {
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    backup::export_trades_csv(diary.entries()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::state;
    use crate::commands::{get_day, get_locale_state, save_day, set_locale};
    use crate::models::Locale;
    use crate::test_support::{date, day_with_trades};

    #[test]
    fn test_backup_moves_between_states() {
        let source = state();
        save_day(&source, day_with_trades(date(2024, 3, 5), &[20.0, -5.0])).unwrap();
        set_locale(&source, "de".to_string()).unwrap();
        let json = export_diary(&source).unwrap();

        let target = state();
        assert_eq!(import_diary(&target, json).unwrap(), 1);
        assert_eq!(get_locale_state(&target).unwrap().locale, Locale::De);
        assert_eq!(get_day(&target, "2024-03-05".to_string()).unwrap().pnl, 15.0);
    }

    #[test]
    fn test_invalid_backup_reports_error() {
        let state = state();
        let err = import_diary(&state, "not json".to_string()).unwrap_err();
        assert!(err.starts_with("Invalid stored data"));
    }

    #[test]
    fn test_csv_command() {
        let state = state();
        assert_eq!(export_trades_csv(&state).unwrap(), "");

        save_day(&state, day_with_trades(date(2024, 3, 5), &[20.0])).unwrap();
        assert_eq!(export_trades_csv(&state).unwrap().lines().count(), 2);
    }
}
