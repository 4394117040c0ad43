//! Read-only L2 order book view for a single product and snapshot.
//! Bids: descending (highest first). Asks: ascending (lowest first).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::PriceLevel;

/// Outstanding resting levels on both sides of one product's book.
///
/// Sell-side quantities are negative by convention. An empty side is a
/// valid state, not an error; accessors return `None` for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDepth {
    pub buy_orders: BTreeMap<i64, i64>,  // price → qty (positive)
    pub sell_orders: BTreeMap<i64, i64>, // price → qty (negative)
}

impl OrderDepth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest resting buy level, if any.
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.buy_orders
            .iter()
            .next_back()
            .map(|(&price, &quantity)| PriceLevel { price, quantity })
    }

    /// Lowest resting sell level, if any.
    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.sell_orders
            .iter()
            .next()
            .map(|(&price, &quantity)| PriceLevel { price, quantity })
    }

    /// Midpoint of the best bid and best ask. `None` unless both sides rest.
    pub fn mid_price(&self) -> Option<f64> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some((bid.price + ask.price) as f64 / 2.0)
    }
}
