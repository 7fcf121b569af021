use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::generator::{
    GeneratorConfig, DEFAULT_FAST_PERIOD, DEFAULT_MAX_STEPS, DEFAULT_SLOW_PERIOD,
    DEFAULT_START_PRICE, DEFAULT_VOLATILITY,
};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub market: MarketConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Ticks served by `/api/market-data` when the request names none.
    pub steps: usize,
    pub start_price: f64,
    pub volatility: f64,
    pub fast_period: usize,
    pub slow_period: usize,
    pub tick_interval: String,
    pub max_steps: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            steps: 100,
            start_price: DEFAULT_START_PRICE,
            volatility: DEFAULT_VOLATILITY,
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            tick_interval: "1m".to_string(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl MarketConfig {
    pub fn tick_interval_ms(&self) -> Result<u64> {
        parse_interval_ms(&self.tick_interval)
    }

    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let config = GeneratorConfig {
            start_price: self.start_price,
            volatility: self.volatility,
            fast_period: self.fast_period,
            slow_period: self.slow_period,
            tick_interval_ms: self
                .tick_interval_ms()
                .context("market.tick_interval is invalid")?,
            max_steps: self.max_steps,
        };
        config.validate().context("invalid [market] settings")?;
        if self.steps > self.max_steps {
            bail!(
                "market.steps ({}) exceeds market.max_steps ({})",
                self.steps,
                self.max_steps
            );
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Parse a tick spacing such as "30s", "1m", "4h", "1d", "1w" or "1M" (30 days)
/// into milliseconds.
pub fn parse_interval_ms(s: &str) -> Result<u64> {
    let Some((unit_at, unit)) = s.char_indices().last() else {
        bail!("tick interval is empty: expected format like '1m'");
    };
    let count = &s[..unit_at];
    if count.is_empty() {
        bail!("tick interval '{}' has no count: expected format like '1m'", s);
    }
    let n: u64 = count
        .parse()
        .with_context(|| format!("tick interval '{}': count must be a positive integer", s))?;
    if n == 0 {
        bail!("tick interval '{}': count must be > 0", s);
    }

    let unit_ms: u64 = match unit {
        's' => 1_000,
        'm' => 60_000,
        'h' => 3_600_000,
        'd' => 86_400_000,
        'w' => 7 * 86_400_000,
        'M' => 30 * 86_400_000,
        other => bail!(
            "tick interval '{}': unknown unit '{}', expected one of s/m/h/d/w/M",
            s,
            other
        ),
    };

    n.checked_mul(unit_ms)
        .with_context(|| format!("tick interval '{}' overflows milliseconds", s))
}

impl Config {
    /// Load `.env`, then the TOML file named by `MARKET_RIBBON_CONFIG`
    /// (default `config/default.toml`), then host/port env overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("MARKET_RIBBON_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::load_from(&config_path)?;

        if let Ok(host) = std::env::var("MARKET_RIBBON_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("MARKET_RIBBON_PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("MARKET_RIBBON_PORT '{}' is not a valid port", port))?;
        }

        config.market.generator_config()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
