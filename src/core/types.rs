//! Core types - the harness-facing data model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::book::OrderDepth;

/// Tradeable product symbol (e.g., "KELP")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One resting price level in an order book.
///
/// Quantities follow the exchange sign convention: buy-side levels are
/// positive, sell-side levels are negative (size available to buy from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: i64,
    pub quantity: i64,
}

/// Outgoing order. Positive quantity = buy intent, negative = sell intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: i64,
    pub quantity: i64,
}

impl Order {
    pub fn new(symbol: Symbol, price: i64, quantity: i64) -> Self {
        Self { symbol, price, quantity }
    }
}

/// Listing metadata for a tradeable product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: Symbol,
    pub product: String,
    pub denomination: String,
}

/// An executed trade reported by the harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub price: i64,
    pub quantity: i64,
    #[serde(default)]
    pub buyer: String,
    #[serde(default)]
    pub seller: String,
    pub timestamp: u64,
}

/// Per-product conversion quote plus its cost components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConversionObservation {
    pub bid_price: f64,
    pub ask_price: f64,
    pub transport_fees: f64,
    pub export_tariff: f64,
    pub import_tariff: f64,
    pub sugar_price: f64,
    pub sunlight_index: f64,
}

/// Auxiliary market observations. Read for diagnostics only; neither
/// implemented strategy trades on these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Observations {
    pub plain_value_observations: BTreeMap<String, f64>,
    pub conversion_observations: BTreeMap<Symbol, ConversionObservation>,
}

/// One market snapshot handed in by the harness, once per time step.
///
/// `trader_data` is the opaque state blob this trader returned on the
/// previous step (empty on the first call). Everything else is read-only
/// market state for the current step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingState {
    pub timestamp: u64,
    #[serde(default)]
    pub trader_data: String,
    #[serde(default)]
    pub listings: BTreeMap<Symbol, Listing>,
    pub order_depths: BTreeMap<Symbol, OrderDepth>,
    #[serde(default)]
    pub own_trades: BTreeMap<Symbol, Vec<Trade>>,
    #[serde(default)]
    pub market_trades: BTreeMap<Symbol, Vec<Trade>>,
    #[serde(default)]
    pub position: BTreeMap<Symbol, i64>,
    #[serde(default)]
    pub observations: Observations,
}

/// The result of one snapshot cycle, handed back to the harness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyOutput {
    /// Orders keyed by product. Products with nothing to do are omitted.
    pub orders: BTreeMap<Symbol, Vec<Order>>,
    /// Conversion request count. Constant 1 in this strategy.
    pub conversions: i64,
    /// Opaque state blob carried to the next invocation.
    pub trader_data: String,
}
