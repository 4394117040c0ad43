//! Snapshot cycle orchestrator - one `run` per harness time step.

use std::collections::BTreeMap;

use crate::belief::BeliefState;
use crate::core::config::TraderConfig;
use crate::core::types::{StrategyOutput, TradingState};
use crate::diagnostics::DiagnosticsSink;
use crate::quoting::quote;

/// The strategy evaluator. Holds only configuration; all run-to-run state
/// travels through the `trader_data` blob, so the harness is free to
/// restart the process between calls.
pub struct Trader {
    config: TraderConfig,
}

impl Trader {
    pub fn new(config: TraderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TraderConfig {
        &self.config
    }

    /// Evaluate one market snapshot.
    ///
    /// Never fails: a malformed prior blob reinitializes the belief state,
    /// a product the catalog does not know is skipped, and a one-sided book
    /// just mutes the affected branch. The diagnostics payload is emitted
    /// through `tracing` and has no effect on the returned orders.
    pub fn run(&self, state: &TradingState) -> StrategyOutput {
        let mut sink = DiagnosticsSink::new();
        self.narrate_snapshot(state, &mut sink);

        // Step 1: decode the prior belief state.
        let mut beliefs = match BeliefState::decode(&state.trader_data, &self.config) {
            Ok(beliefs) => beliefs,
            Err(e) => {
                tracing::warn!(error = %e, "malformed state blob, reinitializing");
                sink.print(format!("malformed state blob, reinitializing: {e}"));
                BeliefState::empty(&self.config)
            }
        };

        // Step 2: quote every catalog product in the snapshot, against the
        // belief windows as they stood BEFORE this snapshot.
        let mut orders = BTreeMap::new();
        for (symbol, depth) in &state.order_depths {
            let Some(product) = self.config.products.get(symbol) else {
                continue;
            };
            let window = beliefs.window(symbol);
            if product.model.needs_history() && window.is_none_or(|w| w.is_empty()) {
                // No history yet means no opinion; the 0.0 fallback estimate
                // must not be allowed to hit the sell branch.
                continue;
            }
            let fair_value = product.model.estimate(window);
            let product_orders = quote(symbol, depth, fair_value, product.spread, &mut sink);
            if !product_orders.is_empty() {
                orders.insert(symbol.clone(), product_orders);
            }
        }

        // Steps 3-4: fold the current snapshot into the belief state and
        // serialize it for the next call.
        beliefs.observe(&state.order_depths, self.config.belief_cap);
        let trader_data = beliefs.encode().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "belief state encode failed, dropping history");
            String::new()
        });

        let conversions = 1;
        match sink.flush(state, &orders, conversions, &trader_data) {
            Ok(payload) => tracing::info!(target: "prosperity_trader::wire", "{payload}"),
            Err(e) => tracing::warn!(error = %e, "diagnostics flush failed"),
        }

        StrategyOutput { orders, conversions, trader_data }
    }

    fn narrate_snapshot(&self, state: &TradingState, sink: &mut DiagnosticsSink) {
        sink.print(format!("traderData: {}", state.trader_data));
        sink.print(format!("Observations: {:?}", state.observations));

        for (symbol, depth) in &state.order_depths {
            if let Some(bid) = depth.best_bid() {
                sink.print(format!("{symbol} best market bid: {}@{}", bid.quantity, bid.price));
            }
            if let Some(ask) = depth.best_ask() {
                sink.print(format!("{symbol} best market ask: {}@{}", ask.quantity, ask.price));
            }
        }
    }
}

impl Default for Trader {
    fn default() -> Self {
        Self::new(TraderConfig::load_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::OrderDepth;
    use crate::core::types::{Order, Symbol};

    fn depth(bids: &[(i64, i64)], asks: &[(i64, i64)]) -> OrderDepth {
        OrderDepth {
            buy_orders: bids.iter().copied().collect(),
            sell_orders: asks.iter().copied().collect(),
        }
    }

    fn snapshot(depths: Vec<(Symbol, OrderDepth)>, blob: &str) -> TradingState {
        TradingState {
            timestamp: 100,
            trader_data: blob.to_string(),
            order_depths: depths.into_iter().collect(),
            ..TradingState::default()
        }
    }

    fn resin() -> Symbol {
        Symbol::new("RAINFOREST_RESIN")
    }

    fn kelp() -> Symbol {
        Symbol::new("KELP")
    }

    #[test]
    fn resin_crosses_a_mispriced_book() {
        let trader = Trader::new(TraderConfig::default());
        let state = snapshot(vec![(resin(), depth(&[(10003, 4)], &[(9998, -5)]))], "");

        let output = trader.run(&state);
        assert_eq!(output.conversions, 1);
        assert_eq!(
            output.orders[&resin()],
            vec![Order::new(resin(), 9998, 5), Order::new(resin(), 10003, -4)]
        );
    }

    #[test]
    fn drifting_product_is_quiet_without_history() {
        let trader = Trader::new(TraderConfig::default());
        let state = snapshot(vec![(kelp(), depth(&[(2015, 10)], &[(2019, -10)]))], "");

        let output = trader.run(&state);
        assert!(output.orders.is_empty());
        // but the observation was recorded for the next step
        assert!(output.trader_data.contains("2015"));
        assert!(output.trader_data.contains("2019"));
    }

    #[test]
    fn unknown_products_are_skipped_silently() {
        let trader = Trader::new(TraderConfig::default());
        let state = snapshot(
            vec![(Symbol::new("SQUID_INK"), depth(&[(5000, 3)], &[(4000, -3)]))],
            "",
        );

        let output = trader.run(&state);
        assert!(output.orders.is_empty());
    }

    #[test]
    fn malformed_blob_reinitializes_instead_of_failing() {
        let trader = Trader::new(TraderConfig::default());
        let state = snapshot(
            vec![(kelp(), depth(&[(2015, 10)], &[(2019, -10)]))],
            "{definitely not the schema",
        );

        let output = trader.run(&state);
        assert!(output.orders.is_empty());
        // fresh state with exactly this snapshot's observation
        let beliefs =
            BeliefState::decode(&output.trader_data, trader.config()).unwrap();
        assert_eq!(beliefs.window(&kelp()).unwrap().len(), 1);
    }

    #[test]
    fn belief_state_round_trips_through_run() {
        let trader = Trader::new(TraderConfig::default());
        let mut blob = String::new();
        for i in 0..5 {
            let state = snapshot(
                vec![(kelp(), depth(&[(2015 + i, 10)], &[(2019 + i, -10)]))],
                &blob,
            );
            blob = trader.run(&state).trader_data;
        }
        let beliefs = BeliefState::decode(&blob, trader.config()).unwrap();
        assert_eq!(beliefs.window(&kelp()).unwrap().len(), 5);
    }
}
