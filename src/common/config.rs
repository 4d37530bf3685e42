//! Engine configuration and venue credentials.
//!
//! The decision loop takes an explicit [EngineConfig] at construction; there is no
//! process-wide mutable configuration.

use std::time::Duration;

/// Loads environment variables from a `.env` file if present.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Tunables for one decision loop.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum net-spread / effective-buy-cost ratio to accept an opportunity
    /// (0.001 = 0.1%). Deployment risk tolerance, not a hard-coded law.
    pub min_profit_ratio: f64,
    /// Upper bound on the base quantity sent per leg. The executable quantity is
    /// min(ask qty, bid qty) capped by this.
    pub max_order_quantity: f64,
    /// Sleep before the next evaluation after a cycle that executed.
    pub promising_interval: Duration,
    /// Sleep before the next evaluation after a cycle that found nothing.
    pub idle_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_profit_ratio: 0.001,
            max_order_quantity: 0.01,
            promising_interval: Duration::from_secs(2),
            idle_interval: Duration::from_secs(20),
        }
    }
}

impl EngineConfig {
    /// Reads `ARB_MIN_PROFIT_RATIO`, `ARB_MAX_ORDER_QTY`, `ARB_PROMISING_INTERVAL_MS`
    /// and `ARB_IDLE_INTERVAL_MS`, falling back to defaults for anything unset or
    /// unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_profit_ratio: env_f64("ARB_MIN_PROFIT_RATIO")
                .unwrap_or(defaults.min_profit_ratio),
            max_order_quantity: env_f64("ARB_MAX_ORDER_QTY")
                .unwrap_or(defaults.max_order_quantity),
            promising_interval: env_u64("ARB_PROMISING_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.promising_interval),
            idle_interval: env_u64("ARB_IDLE_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.idle_interval),
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok()?.parse().ok()
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.parse().ok()
}

/// API credentials for one venue's signed endpoints.
#[derive(Debug, Clone)]
pub struct VenueCredentials {
    pub api_key: String,
    pub api_secret: String,
    /// Required by Coinbase, unused elsewhere.
    pub passphrase: Option<String>,
}

impl VenueCredentials {
    /// Reads `<PREFIX>_API_KEY`, `<PREFIX>_API_SECRET` and optionally
    /// `<PREFIX>_PASSPHRASE`. Returns None if key or secret is missing, in which
    /// case the adapter works in public-data-only mode.
    pub fn from_env(prefix: &str) -> Option<Self> {
        let api_key = std::env::var(format!("{}_API_KEY", prefix)).ok()?;
        let api_secret = std::env::var(format!("{}_API_SECRET", prefix)).ok()?;
        let passphrase = std::env::var(format!("{}_PASSPHRASE", prefix)).ok();
        Some(Self {
            api_key,
            api_secret,
            passphrase,
        })
    }
}
