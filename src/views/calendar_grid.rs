use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{signed_currency, Tone};
use crate::diary::calendar::{derive_calendar, grid_start, YearMonth};
use crate::diary::DiaryData;
use crate::i18n::formatters::DateFormatOptions;
use crate::i18n::LocaleStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCellView {
    pub date: NaiveDate,
    pub day: u32,
    pub tone: Tone,
    pub pnl_label: Option<String>,
    pub trades_label: Option<String>,
    pub is_today: bool,
    pub is_selected: bool,
    pub in_current_month: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGridView {
    pub title: String,
    /// Abbreviated weekday names, Sunday first.
    pub weekdays: Vec<String>,
    pub cells: Vec<CalendarCellView>,
}

pub fn calendar_grid(
    month: YearMonth,
    diary: &DiaryData,
    locale: &LocaleStore,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> CalendarGridView {
    let weekday_format = DateFormatOptions::Pattern("%a".to_string());
    let weekdays = grid_start(month)
        .iter_days()
        .take(7)
        .map(|date| locale.format_date(date, &weekday_format))
        .collect();

    let cells = derive_calendar(month, diary)
        .into_iter()
        .map(|cell| {
            let (tone, pnl_label, trades_label) = if cell.has_data {
                (
                    Tone::for_pnl(cell.pnl),
                    Some(signed_currency(locale, cell.pnl)),
                    Some(locale.pluralize("diary.calendar.trades", cell.trades, &[])),
                )
            } else {
                (Tone::Empty, None, None)
            };

            CalendarCellView {
                date: cell.date,
                day: cell.date.day(),
                tone,
                pnl_label,
                trades_label,
                is_today: cell.date == today,
                is_selected: selected == Some(cell.date),
                in_current_month: cell.in_current_month,
            }
        })
        .collect();

    CalendarGridView {
        title: locale.format_date(month.first_day(), &DateFormatOptions::MonthYear),
        weekdays,
        cells,
    }
}
