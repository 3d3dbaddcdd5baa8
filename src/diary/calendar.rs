use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::DiaryData;
use crate::error::{DiaryError, Result};

/// Cells in a month grid: six weeks of seven days.
pub const CALENDAR_CELLS: usize = 42;

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or(DiaryError::InvalidMonth { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        let next = self.next().first_day();
        next.pred_opt().unwrap_or(next)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month before, wrapping into the previous year after January.
    pub fn previous(&self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::new(year, month).unwrap_or(*self)
    }

    /// The month after, wrapping into the next year after December.
    pub fn next(&self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::new(year, month).unwrap_or(*self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub pnl: f64,
    pub trades: usize,
    pub has_data: bool,
    pub in_current_month: bool,
}

/// Sunday on or before the first of the month.
pub fn grid_start(month: YearMonth) -> NaiveDate {
    let first = month.first_day();
    let offset = u64::from(first.weekday().num_days_from_sunday());
    first.checked_sub_days(Days::new(offset)).unwrap_or(first)
}

/// The 42 cells of the month grid, filled from the diary.
pub fn derive_calendar(month: YearMonth, diary: &DiaryData) -> Vec<CalendarDay> {
    grid_start(month)
        .iter_days()
        .take(CALENDAR_CELLS)
        .map(|date| {
            let record = diary.get(&date);
            CalendarDay {
                date,
                pnl: record.map(|r| r.pnl).unwrap_or(0.0),
                trades: record.map(|r| r.trades.len()).unwrap_or(0),
                has_data: record.is_some_and(|r| r.has_trades()),
                in_current_month: month.contains(date),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayRecord;
    use crate::test_support::{date, day_with_trades};
    use chrono::Weekday;

    #[test]
    fn test_year_month_validation() {
        assert!(YearMonth::new(2024, 12).is_ok());
        assert!(matches!(
            YearMonth::new(2024, 13),
            Err(DiaryError::InvalidMonth { year: 2024, month: 13 })
        ));
        assert!(YearMonth::new(2024, 0).is_err());
    }

    #[test]
    fn test_navigation_wraps_years() {
        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.previous(), YearMonth::new(2023, 12).unwrap());

        let december = YearMonth::new(2024, 12).unwrap();
        assert_eq!(december.next(), YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn test_month_bounds() {
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.last_day(), date(2024, 2, 29));
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2024, 12).unwrap().last_day(), date(2024, 12, 31));
    }

    #[test]
    fn test_grid_has_42_increasing_days_from_sunday() {
        let march = YearMonth::new(2024, 3).unwrap();
        let cells = derive_calendar(march, &DiaryData::new());

        assert_eq!(cells.len(), CALENDAR_CELLS);
        assert_eq!(cells[0].date.weekday(), Weekday::Sun);
        // March 1st 2024 is a Friday
        assert_eq!(cells[0].date, date(2024, 2, 25));
        assert!(cells.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
        assert!(!cells[0].in_current_month);
        assert!(cells[5].in_current_month);
        assert_eq!(cells.iter().filter(|c| c.in_current_month).count(), 31);
    }

    #[test]
    fn test_month_starting_on_sunday_starts_on_the_first() {
        // September 2024 starts on a Sunday
        let cells = derive_calendar(YearMonth::new(2024, 9).unwrap(), &DiaryData::new());
        assert_eq!(cells[0].date, date(2024, 9, 1));
        assert!(cells[0].in_current_month);
    }

    #[test]
    fn test_cells_pick_up_diary_records() {
        let mut diary = DiaryData::new();
        diary.insert(date(2024, 3, 5), day_with_trades(date(2024, 3, 5), &[20.0]));
        diary.insert(date(2024, 3, 6), DayRecord::empty(date(2024, 3, 6)));

        let cells = derive_calendar(YearMonth::new(2024, 3).unwrap(), &diary);
        let fifth = cells.iter().find(|c| c.date == date(2024, 3, 5)).unwrap();
        assert_eq!(fifth.pnl, 20.0);
        assert_eq!(fifth.trades, 1);
        assert!(fifth.has_data);

        // A record without trades is not data
        let sixth = cells.iter().find(|c| c.date == date(2024, 3, 6)).unwrap();
        assert!(!sixth.has_data);
        assert_eq!(sixth.trades, 0);
    }
}
