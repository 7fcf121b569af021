use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indicator::ribbon::RibbonColor;

/// One simulated minute of the feed.
///
/// `sma_fast` and `sma_slow` go out on the wire as `sma_5` / `sma_10`, the
/// names the chart front-end reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTick {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    #[serde(rename = "sma_5")]
    pub sma_fast: Option<f64>,
    #[serde(rename = "sma_10")]
    pub sma_slow: Option<f64>,
    pub ribbon_color: Option<RibbonColor>,
}

impl MarketTick {
    pub fn has_ribbon(&self) -> bool {
        self.ribbon_color.is_some()
    }
}

/// Chronologically ordered ticks from a single generation call.
pub type MarketSeries = Vec<MarketTick>;

/// Round to 2 decimals. The exact binary value is rounded, ties to even,
/// so `2.675` (stored just below) gives `2.67` and `0.125` gives `0.12`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
