//! The quant diary: per-day trade journal, calendar and statistics.

pub mod calendar;
pub mod editor;
pub mod page;
pub mod stats;
pub mod store;

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::DayRecord;

/// Every journaled day, in date order.
pub type DiaryData = BTreeMap<NaiveDate, DayRecord>;

pub use calendar::{derive_calendar, CalendarDay, YearMonth};
pub use editor::{DayEditor, EditorMode};
pub use page::{DayOption, DiaryPage, Modal, Navigator, ViewMode};
pub use stats::{accumulated_stats, equity_curve, monthly_breakdown, monthly_stats, MonthlyStats};
pub use store::DiaryStore;
