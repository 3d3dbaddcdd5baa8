use crate::diary::editor::{DayEditor, EditorMode};
use crate::diary::stats;
use crate::views::{
    accumulated_panel, calendar_grid, day_details, day_options, monthly_stats_panel, CalendarGridView,
    DayDetailsView, DayOptionsView, MonthlyStatsPanel,
};
use crate::AppState;

use super::{parse_date, parse_month};

// Lock order is diary first, then locale.

pub fn get_calendar_view(
    state: &AppState,
    year: i32,
    month: u32,
    today: String,
    selected: Option<String>,
) -> Result<CalendarGridView, String> {
    let month = parse_month(year, month)?;
    let today = parse_date(&today)?;
    let selected = selected.as_deref().map(parse_date).transpose()?;

    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    Ok(calendar_grid(month, diary.entries(), &locale, today, selected))
}

pub fn get_monthly_stats_panel(state: &AppState, year: i32, month: u32) -> Result<MonthlyStatsPanel, String> {
    let month = parse_month(year, month)?;

    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    let stats = stats::monthly_stats(month, diary.entries());
    Ok(monthly_stats_panel(month, &stats, &locale))
}

pub fn get_accumulated_panel(state: &AppState) -> Result<MonthlyStatsPanel, String> {
    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    let stats = stats::accumulated_stats(diary.entries());
    Ok(accumulated_panel(&stats, &locale))
}

pub fn get_day_options_view(state: &AppState, date: String) -> Result<DayOptionsView, String> {
    let date = parse_date(&date)?;
    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    Ok(day_options(date, &locale))
}

pub fn get_day_details_view(state: &AppState, date: String, editing: bool) -> Result<DayDetailsView, String> {
    let date = parse_date(&date)?;
    let mode = if editing { EditorMode::Editing } else { EditorMode::Viewing };

    let diary = state.diary.lock().map_err(|e| e.to_string())?;
    let locale = state.locale.lock().map_err(|e| e.to_string())?;
    let editor = DayEditor::new(diary.day(date), mode);
    Ok(day_details(&editor, &locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::state;
    use crate::commands::{save_day, set_locale};
    use crate::test_support::{date, day_with_trades};
    use crate::views::Tone;

    #[test]
    fn test_calendar_view_command() {
        let state = state();
        save_day(&state, day_with_trades(date(2024, 3, 5), &[20.0])).unwrap();
        set_locale(&state, "en".to_string()).unwrap();

        let view = get_calendar_view(&state, 2024, 3, "2024-03-05".to_string(), Some("2024-03-05".to_string())).unwrap();
        assert_eq!(view.title, "March 2024");

        let fifth = view.cells.iter().find(|c| c.date == date(2024, 3, 5)).unwrap();
        assert!(fifth.is_today && fifth.is_selected);
        assert_eq!(fifth.tone, Tone::Profit);
        assert_eq!(fifth.pnl_label.as_deref(), Some("+R$20.00"));

        assert!(get_calendar_view(&state, 2024, 3, "today".to_string(), None).is_err());
    }

    #[test]
    fn test_stats_panels_follow_locale() {
        let state = state();
        save_day(&state, day_with_trades(date(2024, 3, 5), &[20.0])).unwrap();

        let panel = get_monthly_stats_panel(&state, 2024, 3).unwrap();
        assert_eq!(panel.title, "Resumo de março de 2024");

        set_locale(&state, "en".to_string()).unwrap();
        let panel = get_accumulated_panel(&state).unwrap();
        assert_eq!(panel.title, "Accumulated performance (all time)");
        assert_eq!(panel.cards[0].value, "+R$20.00");
    }

    #[test]
    fn test_day_modals() {
        let state = state();
        set_locale(&state, "en".to_string()).unwrap();

        let options = get_day_options_view(&state, "2024-03-05".to_string()).unwrap();
        assert_eq!(options.title, "Day March 5");

        let details = get_day_details_view(&state, "2024-03-06".to_string(), true).unwrap();
        assert_eq!(details.mode, EditorMode::Editing);
        assert!(details.trades.is_empty());
        assert!(details.empty_message.is_some());
    }
}
