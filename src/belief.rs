//! Belief state store - the rolling price history carried between calls.
//!
//! The evaluator is stateless between invocations; everything it wants to
//! remember rides in an opaque string blob the harness hands back on the
//! next step. The blob is a versioned JSON record mapping each tracked
//! product to its two bounded observation sequences.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::book::OrderDepth;
use crate::core::config::TraderConfig;
use crate::core::types::Symbol;
use crate::core::Result;

const SCHEMA_VERSION: u32 = 1;

/// Rolling window of observed best-bid / best-ask prices for one product.
///
/// The two sequences stay equal length: an update appends to both or to
/// neither. Eviction is FIFO once the cap is reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefWindow {
    pub bids: VecDeque<i64>,
    pub asks: VecDeque<i64>,
}

impl BeliefWindow {
    pub(crate) fn push(&mut self, bid: i64, ask: i64, cap: usize) {
        self.bids.push_back(bid);
        self.asks.push_back(ask);
        while self.bids.len() > cap {
            self.bids.pop_front();
        }
        while self.asks.len() > cap {
            self.asks.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Pairwise mid-prices of the most recent `lookback` observations,
    /// oldest first. Shorter history yields fewer entries.
    pub fn recent_mids(&self, lookback: usize) -> Vec<f64> {
        let skip = self.len().saturating_sub(lookback);
        self.bids
            .iter()
            .skip(skip)
            .zip(self.asks.iter().skip(skip))
            .map(|(&bid, &ask)| (bid + ask) as f64 / 2.0)
            .collect()
    }
}

/// All belief windows, serialized to/from the opaque state blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefState {
    #[serde(rename = "v")]
    pub version: u32,
    pub windows: BTreeMap<Symbol, BeliefWindow>,
}

impl BeliefState {
    /// Fresh state with an empty window for every tracked product.
    pub fn empty(config: &TraderConfig) -> Self {
        let windows = config
            .tracked_products()
            .map(|symbol| (symbol.clone(), BeliefWindow::default()))
            .collect();
        Self { version: SCHEMA_VERSION, windows }
    }

    /// Parse the prior blob. An empty blob is the normal first-call case and
    /// yields `empty`. A malformed blob is an error; the caller decides the
    /// fallback policy (the orchestrator reinitializes and warns).
    pub fn decode(blob: &str, config: &TraderConfig) -> Result<Self> {
        if blob.is_empty() {
            return Ok(Self::empty(config));
        }
        let mut state: Self = serde_json::from_str(blob)?;

        // Products newly added to the catalog start with an empty window.
        for symbol in config.tracked_products() {
            state.windows.entry(symbol.clone()).or_default();
        }
        Ok(state)
    }

    /// Append the current best bid/ask for every tracked product.
    ///
    /// A product whose book is missing, or missing either side, is skipped
    /// entirely this step: recording only half an observation would break the
    /// equal-length invariant, and fabricating the other half would bias the
    /// mid-price history.
    pub fn observe(&mut self, order_depths: &BTreeMap<Symbol, OrderDepth>, cap: usize) {
        for (symbol, window) in &mut self.windows {
            let Some(depth) = order_depths.get(symbol) else {
                continue;
            };
            match (depth.best_bid(), depth.best_ask()) {
                (Some(bid), Some(ask)) => window.push(bid.price, ask.price, cap),
                _ => {
                    tracing::debug!(%symbol, "one-sided book, belief update skipped");
                }
            }
        }
    }

    /// Serialize to the outgoing blob. Deterministic; exact round-trip with
    /// `decode`.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn window(&self, symbol: &Symbol) -> Option<&BeliefWindow> {
        self.windows.get(symbol)
    }
}
