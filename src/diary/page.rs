use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::YearMonth;
use super::editor::{DayEditor, EditorMode};
use super::store::DiaryStore;
use crate::error::Result;
use crate::models::DayRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Calendar,
    Statistics,
    Chart,
}

/// Choices offered when a calendar day is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayOption {
    AddAnalysis,
    AddComments,
    ViewDay,
}

impl DayOption {
    pub const ALL: [DayOption; 3] = [DayOption::AddAnalysis, DayOption::AddComments, DayOption::ViewDay];

    pub fn translation_key(&self) -> &'static str {
        match self {
            DayOption::AddAnalysis => "diary.options.addAnalysis",
            DayOption::AddComments => "diary.options.addComments",
            DayOption::ViewDay => "diary.options.viewDay",
        }
    }
}

/// Routes outside the diary page, owned by the host shell.
pub trait Navigator {
    /// Opens the saved-analysis page for `date`.
    fn open_analysis(&mut self, date: NaiveDate);
}

#[derive(Debug, Clone)]
pub enum Modal {
    Closed,
    Options(NaiveDate),
    Details(DayEditor),
}

/// Month navigation, selection and the options/details modal flow.
#[derive(Debug, Clone)]
pub struct DiaryPage {
    month: YearMonth,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    view_mode: ViewMode,
    modal: Modal,
}

impl DiaryPage {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: YearMonth::from_date(today),
            today,
            selected: None,
            view_mode: ViewMode::default(),
            modal: Modal::Closed,
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn previous_month(&mut self) -> YearMonth {
        self.month = self.month.previous();
        self.month
    }

    pub fn next_month(&mut self) -> YearMonth {
        self.month = self.month.next();
        self.month
    }

    pub fn show_month(&mut self, month: YearMonth) {
        self.month = month;
    }

    /// Selects a day and offers the day options.
    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected = Some(date);
        self.modal = Modal::Options(date);
    }

    /// Acts on an option picked from the options modal. Ignored when that
    /// modal is not open.
    pub fn choose_option(&mut self, option: DayOption, store: &DiaryStore, navigator: &mut dyn Navigator) {
        let Modal::Options(date) = self.modal else {
            log::debug!("Ignoring {:?} without an open options modal", option);
            return;
        };

        self.modal = match option {
            DayOption::ViewDay => Modal::Details(DayEditor::new(store.day(date), EditorMode::Viewing)),
            DayOption::AddComments => Modal::Details(DayEditor::new(store.day(date), EditorMode::Editing)),
            DayOption::AddAnalysis => {
                navigator.open_analysis(date);
                Modal::Closed
            }
        };
    }

    pub fn editor(&self) -> Option<&DayEditor> {
        match &self.modal {
            Modal::Details(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut DayEditor> {
        match &mut self.modal {
            Modal::Details(editor) => Some(editor),
            _ => None,
        }
    }

    /// Saves the open details modal. `None` when no details modal is open.
    pub fn save_details(&mut self, store: &mut DiaryStore) -> Result<Option<DayRecord>> {
        match self.editor_mut() {
            Some(editor) => editor.save(store).map(Some),
            None => Ok(None),
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }
}
