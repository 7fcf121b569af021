//! Synthetic market series: a Gaussian random walk with a fast/slow SMA
//! ribbon computed alongside it.

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::AppError;
use crate::indicator::ribbon::Ribbon;
use crate::model::tick::{round2, MarketSeries, MarketTick};

pub const DEFAULT_START_PRICE: f64 = 1000.0;
pub const DEFAULT_VOLATILITY: f64 = 5.0;
pub const DEFAULT_FAST_PERIOD: usize = 5;
pub const DEFAULT_SLOW_PERIOD: usize = 10;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_MAX_STEPS: usize = 10_000;
/// Largest accepted `|start_price|`.
pub const MAX_START_PRICE: f64 = 1e12;

/// Source of per-tick price increments.
pub trait ShockSource {
    fn next_change(&mut self) -> f64;
}

impl<F: FnMut() -> f64> ShockSource for F {
    fn next_change(&mut self) -> f64 {
        self()
    }
}

/// Zero-mean normal increments drawn from an owned RNG.
#[derive(Debug, Clone)]
pub struct GaussianShocks<R> {
    rng: R,
    normal: Normal<f64>,
}

impl<R: Rng> GaussianShocks<R> {
    pub fn new(rng: R, volatility: f64) -> Result<Self, AppError> {
        let normal =
            Normal::new(0.0, volatility).map_err(|_| AppError::InvalidVolatility(volatility))?;
        Ok(Self { rng, normal })
    }
}

impl GaussianShocks<ThreadRng> {
    pub fn from_entropy(volatility: f64) -> Result<Self, AppError> {
        Self::new(rand::rng(), volatility)
    }
}

impl GaussianShocks<StdRng> {
    /// Reproducible shocks for a given seed.
    pub fn seeded(seed: u64, volatility: f64) -> Result<Self, AppError> {
        Self::new(StdRng::seed_from_u64(seed), volatility)
    }
}

impl<R: Rng> ShockSource for GaussianShocks<R> {
    fn next_change(&mut self) -> f64 {
        self.normal.sample(&mut self.rng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub start_price: f64,
    /// Standard deviation of each step's increment.
    pub volatility: f64,
    pub fast_period: usize,
    pub slow_period: usize,
    pub tick_interval_ms: u64,
    pub max_steps: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_price: DEFAULT_START_PRICE,
            volatility: DEFAULT_VOLATILITY,
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl GeneratorConfig {
    pub fn with_start_price(mut self, start_price: f64) -> Self {
        self.start_price = start_price;
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !self.start_price.is_finite() || self.start_price.abs() > MAX_START_PRICE {
            return Err(AppError::InvalidStartPrice(self.start_price));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(AppError::InvalidVolatility(self.volatility));
        }
        if self.fast_period == 0 || self.fast_period >= self.slow_period {
            return Err(AppError::InvalidWindow {
                fast: self.fast_period,
                slow: self.slow_period,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(AppError::InvalidInterval);
        }
        Ok(())
    }
}

/// Validated generator. Holds no state between calls; every call starts a
/// fresh walk from `start_price`.
#[derive(Debug, Clone)]
pub struct MarketSeriesGenerator {
    config: GeneratorConfig,
}

impl MarketSeriesGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate `steps` ticks from entropy, starting at the current time.
    pub fn generate(&self, steps: usize) -> Result<MarketSeries, AppError> {
        let mut shocks = GaussianShocks::from_entropy(self.config.volatility)?;
        self.generate_with(steps, Utc::now(), &mut shocks)
    }

    /// Deterministic core: the caller supplies the clock reading and the
    /// increments. The running price is kept unrounded; only reported
    /// values are rounded.
    pub fn generate_with<S: ShockSource + ?Sized>(
        &self,
        steps: usize,
        session_start: DateTime<Utc>,
        shocks: &mut S,
    ) -> Result<MarketSeries, AppError> {
        if steps > self.config.max_steps {
            return Err(AppError::StepsOutOfRange {
                requested: steps,
                max: self.config.max_steps,
            });
        }

        let mut ribbon = Ribbon::new(self.config.fast_period, self.config.slow_period);
        let mut current_price = self.config.start_price;
        let mut series = Vec::with_capacity(steps);

        for index in 0..steps {
            current_price += shocks.next_change();
            let reading = ribbon.push(current_price);
            let finite = current_price.is_finite()
                && reading.fast.is_none_or(f64::is_finite)
                && reading.slow.is_none_or(f64::is_finite);
            if !finite {
                return Err(AppError::NonFinitePrice { index });
            }
            let timestamp = tick_time(session_start, self.config.tick_interval_ms, index)
                .ok_or(AppError::TimestampOverflow { index })?;

            series.push(MarketTick {
                timestamp,
                price: round2(current_price),
                sma_fast: reading.fast.map(round2),
                sma_slow: reading.slow.map(round2),
                ribbon_color: reading.color,
            });
        }

        tracing::debug!(
            steps,
            start_price = self.config.start_price,
            final_price = current_price,
            "Generated market series"
        );
        Ok(series)
    }
}

/// Generate with default settings and the given start price.
pub fn generate(steps: usize, start_price: f64) -> Result<MarketSeries, AppError> {
    MarketSeriesGenerator::new(GeneratorConfig::default().with_start_price(start_price))?
        .generate(steps)
}

fn tick_time(session_start: DateTime<Utc>, interval_ms: u64, index: usize) -> Option<DateTime<Utc>> {
    let offset_ms = interval_ms.checked_mul(u64::try_from(index).ok()?)?;
    let offset = TimeDelta::try_milliseconds(i64::try_from(offset_ms).ok()?)?;
    session_start.checked_add_signed(offset)
}
