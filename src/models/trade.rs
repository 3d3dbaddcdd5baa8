use serde::{Deserialize, Serialize};

use crate::error::DiaryError;

pub const DEFAULT_SYMBOL: &str = "WINFUT";
pub const DEFAULT_STRATEGY: &str = "Scalping";
pub const FALLBACK_STRATEGY: &str = "Manual";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

/// A closed trade logged against a diary day.
///
/// `pnl` always follows from side, quantity and prices; the diary store
/// re-derives it on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub side: Side,
    pub quantity: u32,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
    pub entry_time: String,
    pub exit_time: String,
    pub strategy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Trade {
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }

    /// Rejects trades without a positive quantity or usable prices and
    /// re-derives `pnl` for the rest.
    pub fn settle(&mut self) -> Result<(), DiaryError> {
        if self.quantity == 0 {
            return Err(DiaryError::InvalidTrade(format!("{} has no quantity", self.id)));
        }
        if !usable_price(self.entry_price) || !usable_price(self.exit_price) {
            return Err(DiaryError::InvalidTrade(format!(
                "{} needs non-zero entry and exit prices",
                self.id
            )));
        }

        self.pnl = calculate_pnl(self.side, self.quantity, self.entry_price, self.exit_price);
        Ok(())
    }
}

fn usable_price(price: f64) -> bool {
    price.is_finite() && price != 0.0
}

/// Profit of a round trip. Shorts profit when price falls.
pub fn calculate_pnl(side: Side, quantity: u32, entry_price: f64, exit_price: f64) -> f64 {
    let quantity = quantity as f64;
    match side {
        Side::Buy => (exit_price - entry_price) * quantity,
        Side::Sell => (entry_price - exit_price) * quantity,
    }
}

/// Input of the "add trade" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDraft {
    pub symbol: String,
    pub side: Side,
    pub quantity: u32,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub strategy: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Default for TradeDraft {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            side: Side::Buy,
            quantity: 1,
            entry_price: None,
            exit_price: None,
            strategy: DEFAULT_STRATEGY.to_string(),
            notes: None,
        }
    }
}

impl TradeDraft {
    /// Both prices must be present, finite and non-zero.
    pub fn prices(&self) -> Option<(f64, f64)> {
        Some((
            self.entry_price.filter(|p| usable_price(*p))?,
            self.exit_price.filter(|p| usable_price(*p))?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_pnl() {
        assert_eq!(calculate_pnl(Side::Buy, 2, 100.0, 110.0), 20.0);
        assert_eq!(calculate_pnl(Side::Buy, 3, 100.0, 95.0), -15.0);
    }

    #[test]
    fn test_short_pnl_profits_on_decline() {
        assert_eq!(calculate_pnl(Side::Sell, 1, 50.0, 45.0), 5.0);
        assert_eq!(calculate_pnl(Side::Sell, 2, 50.0, 55.0), -10.0);
    }

    #[test]
    fn test_settle_rederives_pnl() {
        let mut trade = Trade {
            id: "t1".to_string(),
            symbol: "WDOFUT".to_string(),
            side: Side::Sell,
            quantity: 2,
            entry_price: 50.0,
            exit_price: 45.0,
            pnl: 500.0,
            entry_time: "10:00:00".to_string(),
            exit_time: "10:00:00".to_string(),
            strategy: "Manual".to_string(),
            notes: None,
        };
        trade.settle().unwrap();
        assert_eq!(trade.pnl, 10.0);

        trade.quantity = 0;
        assert!(matches!(trade.settle(), Err(DiaryError::InvalidTrade(_))));

        trade.quantity = 1;
        trade.exit_price = 0.0;
        assert!(matches!(trade.settle(), Err(DiaryError::InvalidTrade(_))));

        trade.exit_price = f64::INFINITY;
        assert!(trade.settle().is_err());
    }

    #[test]
    fn test_draft_prices_require_both_values() {
        let mut draft = TradeDraft::default();
        assert!(draft.prices().is_none());

        draft.entry_price = Some(100.0);
        assert!(draft.prices().is_none());

        draft.exit_price = Some(0.0);
        assert!(draft.prices().is_none(), "zero price counts as missing");

        draft.exit_price = Some(f64::NAN);
        assert!(draft.prices().is_none());

        draft.exit_price = Some(101.5);
        assert_eq!(draft.prices(), Some((100.0, 101.5)));
    }

    #[test]
    fn test_trade_json_uses_camel_case() {
        let json = r#"{
            "id": "1709640000000",
            "symbol": "WINFUT",
            "side": "sell",
            "quantity": 1,
            "entryPrice": 50.0,
            "exitPrice": 45.0,
            "pnl": 5.0,
            "entryTime": "10:00:00",
            "exitTime": "10:05:00",
            "strategy": "Scalping"
        }"#;

        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.side, Side::Sell);
        assert_eq!(trade.entry_price, 50.0);
        assert!(trade.notes.is_none());
        assert!(trade.is_win());
    }
}
