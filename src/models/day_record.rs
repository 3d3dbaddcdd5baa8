use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::trade::Trade;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excellent,
    Good,
    #[default]
    Neutral,
    Bad,
    Terrible,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Excellent, Mood::Good, Mood::Neutral, Mood::Bad, Mood::Terrible];

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Excellent => "🤩",
            Mood::Good => "😊",
            Mood::Neutral => "😐",
            Mood::Bad => "😔",
            Mood::Terrible => "😡",
        }
    }

    pub fn translation_key(&self) -> &'static str {
        match self {
            Mood::Excellent => "diary.mood.excellent",
            Mood::Good => "diary.mood.good",
            Mood::Neutral => "diary.mood.neutral",
            Mood::Bad => "diary.mood.bad",
            Mood::Terrible => "diary.mood.terrible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistItem {
    Planning,
    Analysis,
    Risk,
    Emotional,
    Review,
}

impl ChecklistItem {
    pub const ALL: [ChecklistItem; 5] = [
        ChecklistItem::Planning,
        ChecklistItem::Analysis,
        ChecklistItem::Risk,
        ChecklistItem::Emotional,
        ChecklistItem::Review,
    ];

    pub fn translation_key(&self) -> &'static str {
        match self {
            ChecklistItem::Planning => "diary.checklist.planning",
            ChecklistItem::Analysis => "diary.checklist.analysis",
            ChecklistItem::Risk => "diary.checklist.risk",
            ChecklistItem::Emotional => "diary.checklist.emotional",
            ChecklistItem::Review => "diary.checklist.review",
        }
    }
}

/// Pre/post session routine. Keys on disk keep the journal's original
/// Portuguese names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Checklist {
    #[serde(rename = "planejamento")]
    pub planning: bool,
    #[serde(rename = "analise")]
    pub analysis: bool,
    #[serde(rename = "risco")]
    pub risk: bool,
    #[serde(rename = "emocional")]
    pub emotional: bool,
    #[serde(rename = "revisao")]
    pub review: bool,
}

impl Checklist {
    pub fn get(&self, item: ChecklistItem) -> bool {
        match item {
            ChecklistItem::Planning => self.planning,
            ChecklistItem::Analysis => self.analysis,
            ChecklistItem::Risk => self.risk,
            ChecklistItem::Emotional => self.emotional,
            ChecklistItem::Review => self.review,
        }
    }

    pub fn set(&mut self, item: ChecklistItem, value: bool) {
        let slot = match item {
            ChecklistItem::Planning => &mut self.planning,
            ChecklistItem::Analysis => &mut self.analysis,
            ChecklistItem::Risk => &mut self.risk,
            ChecklistItem::Emotional => &mut self.emotional,
            ChecklistItem::Review => &mut self.review,
        };
        *slot = value;
    }

    pub fn completed(&self) -> usize {
        ChecklistItem::ALL.iter().filter(|item| self.get(**item)).count()
    }
}

/// One journal entry per calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub pnl: f64,
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub checklist: Checklist,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub market_conditions: String,
    #[serde(default)]
    pub lessons: String,
}

impl DayRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            pnl: 0.0,
            trades: Vec::new(),
            comments: String::new(),
            checklist: Checklist::default(),
            mood: Mood::Neutral,
            market_conditions: String::new(),
            lessons: String::new(),
        }
    }

    pub fn trades_pnl(&self) -> f64 {
        self.trades.iter().map(|t| t.pnl).sum()
    }

    /// Re-derives `pnl` from the trades. Returns true when the stored value drifted.
    pub fn recompute_pnl(&mut self) -> bool {
        let derived = self.trades_pnl();
        let drifted = derived != self.pnl;
        self.pnl = derived;
        drifted
    }

    /// Settles every trade, then the day total. Fails on the first
    /// trade that cannot be stored.
    pub fn settle_trades(&mut self) -> Result<()> {
        for trade in &mut self.trades {
            trade.settle()?;
        }
        self.recompute_pnl();
        Ok(())
    }

    pub fn has_trades(&self) -> bool {
        !self.trades.is_empty()
    }

    pub fn winning_trades(&self) -> usize {
        self.trades.iter().filter(|t| t.is_win()).count()
    }

    pub fn win_rate(&self) -> f64 {
        if self.trades.is_empty() {
            0.0
        } else {
            self.winning_trades() as f64 / self.trades.len() as f64 * 100.0
        }
    }
}
