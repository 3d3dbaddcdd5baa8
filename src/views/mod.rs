//! View models: everything a host needs to render the diary page, already
//! translated and formatted for the active locale.

pub mod calendar_grid;
pub mod day_details;
pub mod day_options;
pub mod monthly_stats;

use serde::Serialize;

use crate::i18n::{formatters, LocaleStore};

pub use calendar_grid::{calendar_grid, CalendarCellView, CalendarGridView};
pub use day_details::{day_details, DayDetailsView};
pub use day_options::{day_options, DayOptionsView};
pub use monthly_stats::{accumulated_panel, monthly_stats_panel, MonthlyStatsPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Profit,
    Loss,
    Flat,
    Empty,
    Neutral,
}

impl Tone {
    pub fn for_pnl(pnl: f64) -> Self {
        if pnl > 0.0 {
            Tone::Profit
        } else if pnl < 0.0 {
            Tone::Loss
        } else {
            Tone::Flat
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub id: &'static str,
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl StatCard {
    fn new(locale: &LocaleStore, id: &'static str, label_key: &str, value: String, tone: Tone) -> Self {
        Self {
            id,
            label: locale.t(label_key),
            value,
            tone,
        }
    }
}

/// Currency with an explicit `+` on gains, e.g. `+R$ 20,00`.
pub fn signed_currency(locale: &LocaleStore, amount: f64) -> String {
    let formatted = locale.format_currency(amount, None);
    if formatters::is_positive(amount, 2) {
        format!("+{}", formatted)
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locale;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_tone_for_pnl() {
        assert_eq!(Tone::for_pnl(1.0), Tone::Profit);
        assert_eq!(Tone::for_pnl(-0.5), Tone::Loss);
        assert_eq!(Tone::for_pnl(0.0), Tone::Flat);
    }

    #[test]
    fn test_signed_currency() {
        let locale = LocaleStore::load(Arc::new(MemoryStore::new()), Some(Locale::Pt), None, Some("BRL".to_string()));
        assert_eq!(signed_currency(&locale, 20.0), "+R$\u{a0}20,00");
        assert_eq!(signed_currency(&locale, -20.0), "-R$\u{a0}20,00");
        assert_eq!(signed_currency(&locale, 0.0), "R$\u{a0}0,00");
        assert_eq!(signed_currency(&locale, 0.004), "R$\u{a0}0,00");
        assert_eq!(signed_currency(&locale, -0.004), "R$\u{a0}0,00");
    }
}
