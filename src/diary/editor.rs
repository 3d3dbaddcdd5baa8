use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

use super::store::DiaryStore;
use crate::error::Result;
use crate::models::{
    calculate_pnl, ChecklistItem, DayRecord, Mood, Trade, TradeDraft, DEFAULT_SYMBOL, FALLBACK_STRATEGY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub pnl: f64,
    pub trades: usize,
    pub win_rate: f64,
}

/// Working copy of one diary day behind the details modal.
///
/// Edits only land while in [`EditorMode::Editing`]; `cancel` throws them
/// away and `save` hands the working copy to the [`DiaryStore`].
#[derive(Debug, Clone)]
pub struct DayEditor {
    saved: DayRecord,
    working: DayRecord,
    mode: EditorMode,
    draft: TradeDraft,
}

fn trade_id(now: &DateTime<Local>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now.timestamp_millis(), &suffix[..8])
}

impl DayEditor {
    pub fn new(record: DayRecord, mode: EditorMode) -> Self {
        Self {
            working: record.clone(),
            saved: record,
            mode,
            draft: TradeDraft::default(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    pub fn record(&self) -> &DayRecord {
        &self.working
    }

    pub fn saved(&self) -> &DayRecord {
        &self.saved
    }

    /// Current contents of the add-trade form.
    pub fn draft(&self) -> &TradeDraft {
        &self.draft
    }

    pub fn start_editing(&mut self) {
        self.mode = EditorMode::Editing;
    }

    pub fn add_trade(&mut self, draft: TradeDraft) -> Option<Trade> {
        self.add_trade_at(draft, Local::now())
    }

    /// Adds a trade stamped with `now`.
    ///
    /// Returns `None`, keeping the draft, when not editing or when either
    /// price is missing, zero or not finite.
    pub fn add_trade_at(&mut self, draft: TradeDraft, now: DateTime<Local>) -> Option<Trade> {
        if !self.is_editing() {
            log::debug!("Ignoring trade for {} outside edit mode", self.working.date);
            return None;
        }

        let Some((entry_price, exit_price)) = draft.prices() else {
            log::debug!("Ignoring trade for {} without usable prices", self.working.date);
            self.draft = draft;
            return None;
        };

        let quantity = draft.quantity.max(1);
        let symbol = match draft.symbol.trim() {
            "" => DEFAULT_SYMBOL.to_string(),
            s => s.to_string(),
        };
        let strategy = match draft.strategy.trim() {
            "" => FALLBACK_STRATEGY.to_string(),
            s => s.to_string(),
        };
        let time = now.format("%H:%M:%S").to_string();

        let trade = Trade {
            id: trade_id(&now),
            symbol,
            side: draft.side,
            quantity,
            entry_price,
            exit_price,
            pnl: calculate_pnl(draft.side, quantity, entry_price, exit_price),
            entry_time: time.clone(),
            exit_time: time,
            strategy,
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
        };

        self.working.trades.push(trade.clone());
        self.working.recompute_pnl();
        self.draft = TradeDraft::default();
        Some(trade)
    }

    pub fn delete_trade(&mut self, id: &str) -> bool {
        if !self.is_editing() {
            return false;
        }

        let before = self.working.trades.len();
        self.working.trades.retain(|t| t.id != id);
        self.working.recompute_pnl();
        self.working.trades.len() != before
    }

    fn edit(&mut self, apply: impl FnOnce(&mut DayRecord)) -> bool {
        if self.is_editing() {
            apply(&mut self.working);
        }
        self.is_editing()
    }

    pub fn set_comments(&mut self, comments: &str) -> bool {
        self.edit(|r| r.comments = comments.to_string())
    }

    pub fn set_mood(&mut self, mood: Mood) -> bool {
        self.edit(|r| r.mood = mood)
    }

    pub fn set_market_conditions(&mut self, text: &str) -> bool {
        self.edit(|r| r.market_conditions = text.to_string())
    }

    pub fn set_lessons(&mut self, text: &str) -> bool {
        self.edit(|r| r.lessons = text.to_string())
    }

    pub fn toggle_checklist(&mut self, item: ChecklistItem) -> bool {
        self.edit(|r| {
            let checked = r.checklist.get(item);
            r.checklist.set(item, !checked);
        })
    }

    /// Persists the working copy and returns to viewing.
    pub fn save(&mut self, store: &mut DiaryStore) -> Result<DayRecord> {
        if !self.is_editing() {
            return Ok(self.saved.clone());
        }

        let stored = store.save(self.working.clone())?;
        self.saved = stored.clone();
        self.working = stored.clone();
        self.mode = EditorMode::Viewing;
        self.draft = TradeDraft::default();
        Ok(stored)
    }

    /// Drops unsaved edits and returns to viewing.
    pub fn cancel(&mut self) {
        self.working = self.saved.clone();
        self.mode = EditorMode::Viewing;
        self.draft = TradeDraft::default();
    }

    pub fn summary(&self) -> DaySummary {
        DaySummary {
            pnl: self.working.trades_pnl(),
            trades: self.working.trades.len(),
            win_rate: self.working.win_rate(),
        }
    }
}
