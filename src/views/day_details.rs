use chrono::NaiveDate;
use serde::Serialize;

use super::{signed_currency, StatCard, Tone};
use crate::diary::editor::{DayEditor, EditorMode};
use crate::i18n::formatters::{DateFormatOptions, NumberFormatOptions};
use crate::i18n::LocaleStore;
use crate::models::{ChecklistItem, Side, Trade, TradeDraft};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistEntry {
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRow {
    pub id: String,
    pub symbol: String,
    pub side: String,
    pub quantity: String,
    pub entry_price: String,
    pub exit_price: String,
    pub pnl: String,
    pub tone: Tone,
    pub time: String,
    pub strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetailsView {
    pub date: NaiveDate,
    pub title: String,
    pub subtitle: String,
    pub mode: EditorMode,
    pub cards: Vec<StatCard>,
    pub checklist: Vec<ChecklistEntry>,
    pub comments: String,
    pub market_conditions: String,
    pub lessons: String,
    pub trades: Vec<TradeRow>,
    /// Shown instead of the trade table on days without trades.
    pub empty_message: Option<String>,
    /// Contents of the add-trade form; only present while editing.
    pub draft: Option<TradeDraft>,
}

fn trade_row(trade: &Trade, locale: &LocaleStore) -> TradeRow {
    let price = NumberFormatOptions::fixed(2);
    let side_key = match trade.side {
        Side::Buy => "diary.trade.buy",
        Side::Sell => "diary.trade.sell",
    };

    TradeRow {
        id: trade.id.clone(),
        symbol: trade.symbol.clone(),
        side: locale.t(side_key),
        quantity: locale.format_number(f64::from(trade.quantity), &NumberFormatOptions::integer()),
        entry_price: locale.format_number(trade.entry_price, &price),
        exit_price: locale.format_number(trade.exit_price, &price),
        pnl: signed_currency(locale, trade.pnl),
        tone: Tone::for_pnl(trade.pnl),
        time: trade.entry_time.clone(),
        strategy: trade.strategy.clone(),
    }
}

pub fn day_details(editor: &DayEditor, locale: &LocaleStore) -> DayDetailsView {
    let record = editor.record();
    let summary = editor.summary();

    let mood = format!("{} {}", record.mood.emoji(), locale.t(record.mood.translation_key()));
    let cards = vec![
        StatCard::new(locale, "dayPnl", "diary.details.dayPnl", signed_currency(locale, summary.pnl), Tone::for_pnl(summary.pnl)),
        StatCard::new(
            locale,
            "trades",
            "diary.details.trades",
            locale.format_number(summary.trades as f64, &NumberFormatOptions::integer()),
            Tone::Neutral,
        ),
        StatCard::new(locale, "winRate", "diary.details.winRate", locale.format_percentage(summary.win_rate, 1), Tone::Neutral),
        StatCard::new(locale, "mood", "diary.details.mood", mood, Tone::Neutral),
    ];

    let checklist = ChecklistItem::ALL
        .iter()
        .map(|&item| ChecklistEntry {
            label: locale.t(item.translation_key()),
            checked: record.checklist.get(item),
        })
        .collect();

    DayDetailsView {
        date: record.date,
        title: locale.format_date(record.date, &DateFormatOptions::Long),
        subtitle: locale.t("diary.details.subtitle"),
        mode: editor.mode(),
        cards,
        checklist,
        comments: record.comments.clone(),
        market_conditions: record.market_conditions.clone(),
        lessons: record.lessons.clone(),
        trades: record.trades.iter().map(|t| trade_row(t, locale)).collect(),
        empty_message: (!record.has_trades()).then(|| locale.t("diary.details.noTrades")),
        draft: editor.is_editing().then(|| editor.draft().clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayRecord, Locale, Mood};
    use crate::storage::MemoryStore;
    use crate::test_support::{date, day_with_trades};
    use std::sync::Arc;

    fn english() -> LocaleStore {
        LocaleStore::load(Arc::new(MemoryStore::new()), Some(Locale::En), None, Some("USD".to_string()))
    }

    #[test]
    fn test_details_for_trading_day() {
        let mut record = day_with_trades(date(2024, 3, 5), &[30.0, -10.0]);
        record.mood = Mood::Excellent;
        record.checklist.planning = true;
        record.comments = "Followed the plan".to_string();
        record.lessons = "Size down after two losses".to_string();
        let editor = DayEditor::new(record, EditorMode::Viewing);

        let view = day_details(&editor, &english());
        assert_eq!(view.title, "Tuesday, March 5, 2024");
        assert_eq!(view.mode, EditorMode::Viewing);
        assert_eq!(view.cards[0].value, "+$20.00");
        assert_eq!(view.cards[1].value, "2");
        assert_eq!(view.cards[2].value, "50.0%");
        assert_eq!(view.cards[3].value, "🤩 Excellent");
        assert_eq!(view.checklist.len(), 5);
        assert!(view.checklist[0].checked);
        assert!(!view.checklist[1].checked);
        assert_eq!(view.trades.len(), 2);
        assert_eq!(view.trades[1].pnl, "-$10.00");
        assert_eq!(view.trades[1].side, "Buy");
        assert_eq!(view.empty_message, None);
        assert_eq!(view.comments, "Followed the plan");
        assert_eq!(view.lessons, "Size down after two losses");
        assert_eq!(view.market_conditions, "");
        assert_eq!(view.draft, None);
    }

    #[test]
    fn test_details_for_empty_day_in_edit_mode() {
        let editor = DayEditor::new(DayRecord::empty(date(2024, 3, 6)), EditorMode::Editing);
        let view = day_details(&editor, &english());

        assert_eq!(view.mode, EditorMode::Editing);
        assert_eq!(view.cards[3].value, "😐 Neutral");
        assert_eq!(view.empty_message.as_deref(), Some("No trades recorded for this day"));
        assert_eq!(view.draft, Some(TradeDraft::default()));
    }

    #[test]
    fn test_details_keep_rejected_draft() {
        let mut editor = DayEditor::new(DayRecord::empty(date(2024, 3, 6)), EditorMode::Editing);
        editor.set_market_conditions("Choppy open");
        let draft = TradeDraft {
            entry_price: Some(100.0),
            ..TradeDraft::default()
        };
        assert!(editor.add_trade(draft.clone()).is_none());

        let view = day_details(&editor, &english());
        assert_eq!(view.market_conditions, "Choppy open");
        assert_eq!(view.draft, Some(draft));
    }
}
