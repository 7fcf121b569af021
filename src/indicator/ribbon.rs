use serde::{Deserialize, Serialize};

use crate::indicator::sma::Sma;

pub const BULL_COLOR: &str = "#0ebb23";
pub const BEAR_COLOR: &str = "#FF0000";

/// Trend color derived from a fast/slow SMA pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RibbonColor {
    #[serde(rename = "#0ebb23")]
    Bull,
    #[serde(rename = "#FF0000")]
    Bear,
}

impl RibbonColor {
    /// Bull only when the fast average is strictly above the slow one.
    pub fn from_averages(fast: f64, slow: f64) -> Self {
        if fast > slow {
            Self::Bull
        } else {
            Self::Bear
        }
    }

    pub fn as_hex(&self) -> &'static str {
        match self {
            Self::Bull => BULL_COLOR,
            Self::Bear => BEAR_COLOR,
        }
    }
}

impl std::fmt::Display for RibbonColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonReading {
    pub fast: Option<f64>,
    pub slow: Option<f64>,
    pub color: Option<RibbonColor>,
}

/// Fast/slow SMA pair fed one price at a time.
#[derive(Debug, Clone)]
pub struct Ribbon {
    fast_sma: Sma,
    slow_sma: Sma,
}

impl Ribbon {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        assert!(
            fast_period < slow_period,
            "fast_period must be less than slow_period"
        );
        Self {
            fast_sma: Sma::new(fast_period),
            slow_sma: Sma::new(slow_period),
        }
    }

    pub fn push(&mut self, price: f64) -> RibbonReading {
        let fast = self.fast_sma.push(price);
        let slow = self.slow_sma.push(price);
        let color = match (fast, slow) {
            (Some(f), Some(s)) => Some(RibbonColor::from_averages(f, s)),
            _ => None,
        };
        RibbonReading { fast, slow, color }
    }

    pub fn fast_period(&self) -> usize {
        self.fast_sma.period()
    }

    pub fn slow_period(&self) -> usize {
        self.slow_sma.period()
    }
}
