//! Prosperity Trader - Core Library
//! Per-snapshot quote-generation and belief-update core for a simulated
//! multi-round exchange competition.

// Public modules
pub mod belief;
pub mod book;
pub mod core;
pub mod diagnostics;
pub mod fair_value;
pub mod quoting;
pub mod trader;

// Re-exports
pub use crate::core::{Error, Order, Result, StrategyOutput, Symbol, TraderConfig, TradingState};
pub use book::OrderDepth;
pub use trader::Trader;
