//! Per-invocation diagnostics sink with a hard output budget.
//!
//! The harness truncates anything over a fixed byte ceiling, so the sink
//! does the truncation itself and keeps the combined payload under budget:
//! the three variable streams (incoming blob, outgoing blob, free-form
//! narration) share the space left after the fixed structure, split evenly.
//!
//! One sink is created per snapshot cycle, written during it, flushed at the
//! end and discarded. Nothing here feeds back into trading decisions.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::core::types::{Order, Symbol, Trade, TradingState};
use crate::core::Result;

/// Output ceiling of the reference deployment.
pub const MAX_LOG_LENGTH: usize = 3750;

/// Truncation marker appended to oversized streams.
const ELLIPSIS: &str = "...";

/// Bounded accumulator for one invocation's diagnostic output.
#[derive(Debug)]
pub struct DiagnosticsSink {
    logs: String,
    max_log_length: usize,
}

impl DiagnosticsSink {
    pub fn new() -> Self {
        Self::with_limit(MAX_LOG_LENGTH)
    }

    pub fn with_limit(max_log_length: usize) -> Self {
        Self { logs: String::new(), max_log_length }
    }

    /// Append one narration line.
    pub fn print(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.logs, "{}", line.as_ref());
    }

    /// Assemble the bounded wire payload and reset the sink.
    ///
    /// Layout: `[state, orders, conversions, trader_data, logs]`, compact
    /// JSON. The incoming blob (inside `state`), the outgoing blob and the
    /// narration are each cut to an equal share of whatever the fixed
    /// structure leaves free.
    pub fn flush(
        &mut self,
        state: &TradingState,
        orders: &BTreeMap<Symbol, Vec<Order>>,
        conversions: i64,
        trader_data: &str,
    ) -> Result<String> {
        let base = json!([
            compress_state(state, ""),
            compress_orders(orders),
            conversions,
            "",
            "",
        ]);
        let base_length = serde_json::to_string(&base)?.len();
        let max_item_length = self.max_log_length.saturating_sub(base_length) / 3;

        let payload = json!([
            compress_state(state, &truncate(&state.trader_data, max_item_length)),
            compress_orders(orders),
            conversions,
            truncate(trader_data, max_item_length),
            truncate(&self.logs, max_item_length),
        ]);
        self.logs.clear();
        Ok(serde_json::to_string(&payload)?)
    }
}

impl Default for DiagnosticsSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `value` so its JSON-escaped form fits in `max_length` bytes, with a
/// trailing ellipsis when anything was dropped. Lengths are measured after
/// escaping: a stream full of newlines doubles in serialized size, and the
/// budget has to hold for the serialized payload, not the raw text.
fn truncate(value: &str, max_length: usize) -> String {
    if escaped_len(value) <= max_length {
        return value.to_string();
    }
    let budget = max_length.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut used = 0;
    for c in value.chars() {
        let cost = escaped_char_len(c);
        if used + cost > budget {
            break;
        }
        out.push(c);
        used += cost;
    }
    out.push_str(ELLIPSIS);
    out
}

fn escaped_len(value: &str) -> usize {
    value.chars().map(escaped_char_len).sum()
}

/// Serialized size of one character inside a JSON string.
fn escaped_char_len(c: char) -> usize {
    match c {
        '"' | '\\' | '\n' | '\r' | '\t' | '\u{8}' | '\u{c}' => 2,
        c if (c as u32) < 0x20 => 6, // \u00XX
        c => c.len_utf8(),
    }
}

fn compress_state(state: &TradingState, trader_data: &str) -> Value {
    json!([
        state.timestamp,
        trader_data,
        compress_listings(state),
        compress_order_depths(state),
        compress_trades(&state.own_trades),
        compress_trades(&state.market_trades),
        &state.position,
        compress_observations(state),
    ])
}

fn compress_listings(state: &TradingState) -> Value {
    let listings: Vec<Value> = state
        .listings
        .values()
        .map(|l| json!([&l.symbol, &l.product, &l.denomination]))
        .collect();
    Value::Array(listings)
}

fn compress_order_depths(state: &TradingState) -> Value {
    let depths: serde_json::Map<String, Value> = state
        .order_depths
        .iter()
        .map(|(symbol, depth)| {
            (
                symbol.to_string(),
                json!([&depth.buy_orders, &depth.sell_orders]),
            )
        })
        .collect();
    Value::Object(depths)
}

fn compress_trades(trades: &BTreeMap<Symbol, Vec<Trade>>) -> Value {
    let flat: Vec<Value> = trades
        .values()
        .flatten()
        .map(|t| json!([&t.symbol, t.price, t.quantity, &t.buyer, &t.seller, t.timestamp]))
        .collect();
    Value::Array(flat)
}

fn compress_observations(state: &TradingState) -> Value {
    let conversions: serde_json::Map<String, Value> = state
        .observations
        .conversion_observations
        .iter()
        .map(|(symbol, o)| {
            (
                symbol.to_string(),
                json!([
                    o.bid_price,
                    o.ask_price,
                    o.transport_fees,
                    o.export_tariff,
                    o.import_tariff,
                    o.sugar_price,
                    o.sunlight_index,
                ]),
            )
        })
        .collect();
    json!([&state.observations.plain_value_observations, conversions])
}

fn compress_orders(orders: &BTreeMap<Symbol, Vec<Order>>) -> Value {
    let flat: Vec<Value> = orders
        .values()
        .flatten()
        .map(|o| json!([&o.symbol, o.price, o.quantity]))
        .collect();
    Value::Array(flat)
}
