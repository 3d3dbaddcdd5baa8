//! Host-facing operations. Every command borrows the shared [`AppState`]
//! and reports failures as display strings.
//!
//! [`AppState`]: crate::AppState

pub mod backup;
pub mod diary;
pub mod locale;
pub mod views;

pub use backup::*;
pub use diary::*;
pub use locale::*;
pub use views::*;

use chrono::NaiveDate;

use crate::diary::YearMonth;
use crate::error::DiaryError;

/// Dates cross the command boundary as `YYYY-MM-DD`.
fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| DiaryError::InvalidDate(date.to_string()).to_string())
}

fn parse_month(year: i32, month: u32) -> Result<YearMonth, String> {
    YearMonth::new(year, month).map_err(|e| e.to_string())
}
