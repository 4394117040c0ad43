//! Strategy catalog configuration.
//!
//! Loads from `trader.toml` when present. All quoting parameters are
//! runtime-configurable; the default catalog matches the deployed round-1
//! strategy (fixed-value resin, EWMA-tracked kelp).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::types::Symbol;
use crate::fair_value::FairValueModel;

/// Per-product strategy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    /// Fair value model for this product
    pub model: FairValueModel,
    /// Half-width of the no-trade band around fair value
    #[serde(default = "default_spread")]
    pub spread: f64,
}

fn default_spread() -> f64 {
    1.0
}

fn default_belief_cap() -> usize {
    50
}

/// Top-level trader configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TraderConfig {
    /// Product catalog. Snapshot products outside this map are skipped.
    pub products: BTreeMap<Symbol, ProductConfig>,
    /// Max observations retained per tracked product
    #[serde(default = "default_belief_cap")]
    pub belief_cap: usize,
}

impl TraderConfig {
    /// Load config from the given TOML file path.
    pub fn load(path: &Path) -> crate::core::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::core::Error::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| crate::core::Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from the default location (project root trader.toml).
    pub fn load_default() -> Self {
        let candidates = [
            "trader.toml",
            concat!(env!("CARGO_MANIFEST_DIR"), "/trader.toml"),
        ];

        for path in &candidates {
            if let Ok(cfg) = Self::load(Path::new(path)) {
                tracing::info!("Loaded trader config from {}", path);
                return cfg;
            }
        }

        tracing::debug!("No trader.toml found, using the default catalog");
        Self::default()
    }

    /// Products whose fair value model consumes the belief window.
    pub fn tracked_products(&self) -> impl Iterator<Item = &Symbol> {
        self.products
            .iter()
            .filter(|(_, cfg)| cfg.model.needs_history())
            .map(|(symbol, _)| symbol)
    }
}

impl Default for TraderConfig {
    fn default() -> Self {
        let mut products = BTreeMap::new();
        products.insert(
            Symbol::new("RAINFOREST_RESIN"),
            ProductConfig {
                model: FairValueModel::Fixed { price: 10_000 },
                spread: 1.0,
            },
        );
        products.insert(
            Symbol::new("KELP"),
            ProductConfig {
                model: FairValueModel::Ewma { alpha: 0.3, lookback: 10 },
                spread: 1.0,
            },
        );
        Self { products, belief_cap: 50 }
    }
}
