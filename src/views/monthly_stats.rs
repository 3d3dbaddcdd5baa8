use serde::Serialize;

use super::{signed_currency, StatCard, Tone};
use crate::diary::calendar::YearMonth;
use crate::diary::stats::MonthlyStats;
use crate::i18n::formatters::{DateFormatOptions, NumberFormatOptions};
use crate::i18n::LocaleStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatsPanel {
    pub title: String,
    pub cards: Vec<StatCard>,
}

fn cards(stats: &MonthlyStats, locale: &LocaleStore) -> Vec<StatCard> {
    let count = |n: usize| locale.format_number(n as f64, &NumberFormatOptions::integer());
    let ratio = |v: f64| {
        if v.is_infinite() {
            "∞".to_string()
        } else {
            locale.format_number(v, &NumberFormatOptions::fixed(2))
        }
    };

    vec![
        StatCard::new(locale, "totalPnl", "diary.stats.totalPnl", signed_currency(locale, stats.total_pnl), Tone::for_pnl(stats.total_pnl)),
        StatCard::new(locale, "totalTrades", "diary.stats.totalTrades", count(stats.total_trades), Tone::Neutral),
        StatCard::new(locale, "winRate", "diary.stats.winRate", locale.format_percentage(stats.win_rate, 1), Tone::Neutral),
        StatCard::new(locale, "tradingDays", "diary.stats.tradingDays", count(stats.trading_days), Tone::Neutral),
        StatCard::new(locale, "bestDay", "diary.stats.bestDay", signed_currency(locale, stats.best_day), Tone::for_pnl(stats.best_day)),
        StatCard::new(locale, "worstDay", "diary.stats.worstDay", signed_currency(locale, stats.worst_day), Tone::for_pnl(stats.worst_day)),
        StatCard::new(locale, "avgDailyPnl", "diary.stats.avgDailyPnl", signed_currency(locale, stats.avg_daily_pnl), Tone::for_pnl(stats.avg_daily_pnl)),
        StatCard::new(locale, "consistency", "diary.stats.consistency", locale.format_percentage(stats.consistency, 1), Tone::Neutral),
        StatCard::new(locale, "profitableDays", "diary.stats.profitableDays", count(stats.profitable_days), Tone::Profit),
        StatCard::new(locale, "losingDays", "diary.stats.losingDays", count(stats.losing_days), Tone::Loss),
        StatCard::new(locale, "grossProfit", "diary.stats.grossProfit", locale.format_currency(stats.gross_profit, None), Tone::Profit),
        StatCard::new(locale, "grossLoss", "diary.stats.grossLoss", locale.format_currency(stats.gross_loss, None), Tone::Loss),
        StatCard::new(locale, "profitFactor", "diary.stats.profitFactor", ratio(stats.profit_factor), Tone::Neutral),
        StatCard::new(locale, "maxDrawdown", "diary.stats.maxDrawdown", locale.format_currency(stats.max_drawdown, None), Tone::Loss),
        StatCard::new(locale, "sharpeRatio", "diary.stats.sharpeRatio", ratio(stats.sharpe_ratio), Tone::Neutral),
    ]
}

pub fn monthly_stats_panel(month: YearMonth, stats: &MonthlyStats, locale: &LocaleStore) -> MonthlyStatsPanel {
    let month_name = locale.format_date(month.first_day(), &DateFormatOptions::MonthYear);
    MonthlyStatsPanel {
        title: locale.translate("diary.stats.title", &[("month", month_name)]),
        cards: cards(stats, locale),
    }
}

pub fn accumulated_panel(stats: &MonthlyStats, locale: &LocaleStore) -> MonthlyStatsPanel {
    MonthlyStatsPanel {
        title: locale.t("diary.stats.accumulated"),
        cards: cards(stats, locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diary::stats::monthly_stats;
    use crate::diary::DiaryData;
    use crate::models::Locale;
    use crate::storage::MemoryStore;
    use crate::test_support::{date, day_with_trades};
    use std::sync::Arc;

    fn locale(code: Locale) -> LocaleStore {
        LocaleStore::load(Arc::new(MemoryStore::new()), Some(code), None, Some("BRL".to_string()))
    }

    fn card<'a>(panel: &'a MonthlyStatsPanel, id: &str) -> &'a StatCard {
        panel.cards.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_panel_in_portuguese() {
        let mut diary = DiaryData::new();
        diary.insert(date(2024, 3, 5), day_with_trades(date(2024, 3, 5), &[20.0]));
        let month = YearMonth::new(2024, 3).unwrap();
        let stats = monthly_stats(month, &diary);

        let panel = monthly_stats_panel(month, &stats, &locale(Locale::Pt));
        assert_eq!(panel.title, "Resumo de março de 2024");
        assert_eq!(panel.cards.len(), 15);
        assert_eq!(panel.cards[0].id, "totalPnl");

        let total = card(&panel, "totalPnl");
        assert_eq!(total.value, "+R$\u{a0}20,00");
        assert_eq!(total.tone, Tone::Profit);
        assert_eq!(card(&panel, "winRate").value, "100,0%");
        assert_eq!(card(&panel, "profitFactor").value, "∞");
    }

    #[test]
    fn test_empty_month_panel_shows_zeros() {
        let month = YearMonth::new(2024, 3).unwrap();
        let panel = monthly_stats_panel(month, &MonthlyStats::default(), &locale(Locale::En));

        assert_eq!(panel.title, "March 2024 summary");
        assert_eq!(card(&panel, "totalPnl").value, "R$0.00");
        assert_eq!(card(&panel, "totalPnl").tone, Tone::Flat);
        assert_eq!(card(&panel, "tradingDays").value, "0");
        assert_eq!(card(&panel, "sharpeRatio").value, "0.00");
    }

    #[test]
    fn test_accumulated_panel_title() {
        let panel = accumulated_panel(&MonthlyStats::default(), &locale(Locale::En));
        assert_eq!(panel.title, "Accumulated performance (all time)");
    }
}
