//! Fair value estimation - one tagged model per catalog product.

use serde::Deserialize;

use crate::belief::BeliefWindow;

/// How a product's theoretical price is computed each step.
///
/// Resolved from config at startup; dispatch is a plain match, no runtime
/// registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FairValueModel {
    /// Constant theoretical price.
    Fixed { price: i64 },
    /// Exponentially-weighted moving average over the last `lookback`
    /// mid-prices of the belief window.
    Ewma { alpha: f64, lookback: usize },
    /// Least-squares line over the last `lookback` mid-prices, extrapolated
    /// one step ahead.
    Trend { lookback: usize },
}

impl FairValueModel {
    /// Whether this model reads the belief window.
    pub fn needs_history(&self) -> bool {
        match self {
            FairValueModel::Fixed { .. } => false,
            FairValueModel::Ewma { .. } | FairValueModel::Trend { .. } => true,
        }
    }

    /// Estimate the fair price. Never fails: an absent or empty window
    /// degrades to 0.0, which the orchestrator treats as "no opinion".
    pub fn estimate(&self, window: Option<&BeliefWindow>) -> f64 {
        match *self {
            FairValueModel::Fixed { price } => price as f64,
            FairValueModel::Ewma { alpha, lookback } => {
                let mids = window.map(|w| w.recent_mids(lookback)).unwrap_or_default();
                ewma(&mids, alpha)
            }
            FairValueModel::Trend { lookback } => {
                let mids = window.map(|w| w.recent_mids(lookback)).unwrap_or_default();
                extrapolate(&mids)
            }
        }
    }
}

/// EWMA with smoothing factor `alpha`: S[0] = x[0],
/// S[i] = alpha * x[i] + (1 - alpha) * S[i-1]. Empty input → 0.0.
fn ewma(data: &[f64], alpha: f64) -> f64 {
    let mut iter = data.iter();
    let Some(&first) = iter.next() else {
        return 0.0;
    };
    iter.fold(first, |smoothed, &x| alpha * x + (1.0 - alpha) * smoothed)
}

/// Fit y = m*x + b by least squares and predict the next point.
/// Fewer than two samples: return the last one, or 0.0 when empty.
fn extrapolate(data: &[f64]) -> f64 {
    match data.len() {
        0 => return 0.0,
        1 => return data[0],
        _ => {}
    }

    let n = data.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = data.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (i, &y) in data.iter().enumerate() {
        let dx = i as f64 - mean_x;
        cov += dx * (y - mean_y);
        var += dx * dx;
    }
    let m = cov / var;
    let b = mean_y - m * mean_x;
    m * n + b
}
