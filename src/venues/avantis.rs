//! Avantis oracle-price adapter
//!
//! Fixed-fee perps priced off an oracle feed. A handful of major pairs are
//! promoted as zero-slippage markets and get no spread at all; everything
//! else pays a flat parametric half-spread.

use super::{FetchError, VenueAdapter, VenueId};
use crate::snapshot::{MarketSnapshot, OracleSnapshot};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::time::Duration;

/// Avantis price feed endpoint
pub const AVANTIS_PRICES_URL: &str = "https://api.avantisfi.com/v1/prices";

/// Markets executed with zero spread against the oracle
const ZERO_SLIPPAGE_TICKERS: [&str; 6] =
    ["XAUUSD", "USDJPY", "GBPUSD", "EURUSD", "QQQUSD", "SPYUSD"];

/// Configuration for the Avantis client
#[derive(Debug, Clone)]
pub struct AvantisConfig {
    /// Price feed URL
    pub prices_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Half-spread applied to markets outside the zero-slippage set
    pub default_spread_bps: Decimal,
}

impl Default for AvantisConfig {
    fn default() -> Self {
        Self {
            prices_url: AVANTIS_PRICES_URL.to_string(),
            timeout: Duration::from_secs(10),
            default_spread_bps: dec!(2.0),
        }
    }
}

/// Client for the Avantis price feed
pub struct AvantisClient {
    config: AvantisConfig,
    client: Client,
}

impl AvantisClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(AvantisConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: AvantisConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for AvantisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueAdapter for AvantisClient {
    fn id(&self) -> VenueId {
        VenueId::Avantis
    }

    async fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, FetchError> {
        tracing::debug!(pair = ticker, "Fetching Avantis price feed");

        let response = self.client.get(&self.config.prices_url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Api(format!(
                "price feed returned {}",
                response.status()
            )));
        }

        let feed: PriceFeed = response.json().await?;
        translate(feed, ticker, self.config.default_spread_bps)
    }
}

#[derive(Debug, Deserialize)]
struct PriceFeed {
    prices: Vec<PairPrice>,
}

#[derive(Debug, Deserialize)]
struct PairPrice {
    pair: String,
    price: Decimal,
}

fn is_zero_slippage(ticker: &str) -> bool {
    ZERO_SLIPPAGE_TICKERS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(ticker))
}

fn translate(
    feed: PriceFeed,
    ticker: &str,
    default_spread_bps: Decimal,
) -> Result<MarketSnapshot, FetchError> {
    let pair = feed
        .prices
        .into_iter()
        .find(|p| p.pair.eq_ignore_ascii_case(ticker))
        .ok_or_else(|| FetchError::MarketNotFound(ticker.to_string()))?;

    if pair.price <= Decimal::ZERO {
        return Err(FetchError::Malformed(format!(
            "non-positive price for {ticker}: {}",
            pair.price
        )));
    }

    let spread_bps = if is_zero_slippage(ticker) {
        Decimal::ZERO
    } else {
        default_spread_bps
    };

    Ok(MarketSnapshot::Oracle(OracleSnapshot {
        oracle_price: pair.price,
        spread_bps,
        skew_bps: None,
        timestamp: Utc::now(),
    }))
}
