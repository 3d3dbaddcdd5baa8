use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::YearMonth;
use super::DiaryData;
use crate::models::DayRecord;

/// Summary statistics over a set of diary days.
///
/// Only days with at least one trade count as trading days; every ratio is
/// 0 when its denominator is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub total_trades: usize,
    pub trading_days: usize,
    pub win_rate: f64,
    pub best_day: f64,
    pub worst_day: f64,
    #[serde(rename = "avgDailyPnL")]
    pub avg_daily_pnl: f64,
    pub consistency: f64,
    pub profitable_days: usize,
    pub losing_days: usize,
    pub gross_profit: f64,
    pub gross_loss: f64,
    /// Infinite when there are profits and no losses; serialized as `null` then.
    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBreakdown {
    pub month: u32,
    pub trades: usize,
    pub days: usize,
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    pub date: NaiveDate,
    #[serde(rename = "dailyPnL")]
    pub daily_pnl: f64,
    #[serde(rename = "cumulativePnL")]
    pub cumulative_pnl: f64,
    pub trade_count: usize,
}

fn month_records(month: YearMonth, diary: &DiaryData) -> impl Iterator<Item = &DayRecord> {
    diary
        .range(month.first_day()..=month.last_day())
        .map(|(_, record)| record)
}

pub fn monthly_stats(month: YearMonth, diary: &DiaryData) -> MonthlyStats {
    compute_stats(month_records(month, diary))
}

/// The same statistics over the whole diary.
pub fn accumulated_stats(diary: &DiaryData) -> MonthlyStats {
    compute_stats(diary.values())
}

/// Records are expected in date order, which `DiaryData` guarantees.
pub fn compute_stats<'a>(records: impl Iterator<Item = &'a DayRecord>) -> MonthlyStats {
    let trading_days: Vec<&DayRecord> = records.filter(|r| r.has_trades()).collect();
    if trading_days.is_empty() {
        return MonthlyStats::default();
    }

    let daily_pnls: Vec<f64> = trading_days.iter().map(|r| r.pnl).collect();
    let day_count = daily_pnls.len();

    let total_pnl: f64 = daily_pnls.iter().sum();
    let total_trades: usize = trading_days.iter().map(|r| r.trades.len()).sum();
    let winning_trades: usize = trading_days.iter().map(|r| r.winning_trades()).sum();

    let win_rate = if total_trades > 0 {
        winning_trades as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };

    let best_day = daily_pnls.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let worst_day = daily_pnls.iter().copied().fold(f64::INFINITY, f64::min);

    let profitable_days = daily_pnls.iter().filter(|&&p| p > 0.0).count();
    let losing_days = daily_pnls.iter().filter(|&&p| p < 0.0).count();

    // Gross figures are per trade
    let trade_pnls = || trading_days.iter().flat_map(|r| r.trades.iter().map(|t| t.pnl));
    let gross_profit: f64 = trade_pnls().filter(|p| *p > 0.0).sum();
    let gross_loss: f64 = trade_pnls().filter(|p| *p < 0.0).map(f64::abs).sum();

    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    MonthlyStats {
        total_pnl,
        total_trades,
        trading_days: day_count,
        win_rate,
        best_day,
        worst_day,
        avg_daily_pnl: total_pnl / day_count as f64,
        consistency: profitable_days as f64 / day_count as f64 * 100.0,
        profitable_days,
        losing_days,
        gross_profit,
        gross_loss,
        profit_factor,
        max_drawdown: max_drawdown(&daily_pnls),
        sharpe_ratio: sharpe_ratio(&daily_pnls),
    }
}

/// Largest peak-to-trough decline of the running total, starting from zero.
fn max_drawdown(daily_pnls: &[f64]) -> f64 {
    let mut cumulative = 0.0;
    let mut peak = 0.0_f64;
    let mut drawdown = 0.0_f64;

    for pnl in daily_pnls {
        cumulative += pnl;
        peak = peak.max(cumulative);
        drawdown = drawdown.max(peak - cumulative);
    }
    drawdown
}

/// Mean over sample standard deviation of daily results, unannualized.
fn sharpe_ratio(daily_pnls: &[f64]) -> f64 {
    if daily_pnls.len() < 2 {
        return 0.0;
    }

    let n = daily_pnls.len() as f64;
    let mean = daily_pnls.iter().sum::<f64>() / n;
    let variance = daily_pnls.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();

    if std_dev > 0.0 { mean / std_dev } else { 0.0 }
}

/// One row per month of `year`, January first.
pub fn monthly_breakdown(year: i32, diary: &DiaryData) -> Vec<MonthBreakdown> {
    (1..=12)
        .filter_map(|m| YearMonth::new(year, m).ok())
        .map(|month| {
            let trading: Vec<&DayRecord> = month_records(month, diary).filter(|r| r.has_trades()).collect();
            MonthBreakdown {
                month: month.month(),
                trades: trading.iter().map(|r| r.trades.len()).sum(),
                days: trading.len(),
                pnl: trading.iter().map(|r| r.pnl).sum(),
            }
        })
        .collect()
}

/// Running total across trading days in date order.
pub fn equity_curve(diary: &DiaryData) -> Vec<EquityPoint> {
    let mut cumulative = 0.0;
    diary
        .values()
        .filter(|r| r.has_trades())
        .map(|record| {
            cumulative += record.pnl;
            EquityPoint {
                date: record.date,
                daily_pnl: record.pnl,
                cumulative_pnl: cumulative,
                trade_count: record.trades.len(),
            }
        })
        .collect()
}
