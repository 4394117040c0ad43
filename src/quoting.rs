//! Quoting policy - cross the book when it strays outside the no-trade band.

use crate::book::OrderDepth;
use crate::core::types::{Order, Symbol};
use crate::diagnostics::DiagnosticsSink;

/// Emit at most one buy and one sell order for `symbol` against the current
/// book.
///
/// A resting ask strictly below `fair_value - spread` is lifted in full; a
/// resting bid strictly above `fair_value + spread` is hit in full. Prices
/// exactly on the band edge do not trade. The two checks are independent, so
/// zero, one or two orders come back, buy first.
pub fn quote(
    symbol: &Symbol,
    depth: &OrderDepth,
    fair_value: f64,
    spread: f64,
    sink: &mut DiagnosticsSink,
) -> Vec<Order> {
    let mut orders = Vec::with_capacity(2);

    if let Some(ask) = depth.best_ask() {
        if (ask.price as f64) < fair_value - spread {
            // Resting ask size is negative; negating takes the full level.
            sink.print(format!("BUY {}x {}", -ask.quantity, ask.price));
            orders.push(Order::new(symbol.clone(), ask.price, -ask.quantity));
        }
    }

    if let Some(bid) = depth.best_bid() {
        if (bid.price as f64) > fair_value + spread {
            sink.print(format!("SELL {}x {}", bid.quantity, bid.price));
            orders.push(Order::new(symbol.clone(), bid.price, -bid.quantity));
        }
    }

    orders
}
