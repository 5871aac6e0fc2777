//! Hyperliquid L2 book adapter
//!
//! Fetches depth via the info endpoint: `POST /info` with
//! `{"type":"l2Book","coin":...}`. Levels arrive as two arrays (bids then
//! asks) of `{px, sz}` decimal strings.

use super::{FetchError, VenueAdapter, VenueId};
use crate::snapshot::{MarketSnapshot, OrderbookSnapshot, PriceLevel};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use std::time::Duration;

/// Hyperliquid info endpoint
pub const HYPERLIQUID_API_URL: &str = "https://api.hyperliquid.xyz/info";

/// Configuration for the Hyperliquid client
#[derive(Debug, Clone)]
pub struct HyperliquidConfig {
    /// Info endpoint URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HyperliquidConfig {
    fn default() -> Self {
        Self {
            base_url: HYPERLIQUID_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Hyperliquid info API
pub struct HyperliquidClient {
    config: HyperliquidConfig,
    client: Client,
}

impl HyperliquidClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(HyperliquidConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: HyperliquidConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for HyperliquidClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueAdapter for HyperliquidClient {
    fn id(&self) -> VenueId {
        VenueId::Hyperliquid
    }

    async fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, FetchError> {
        tracing::debug!(coin = ticker, "Fetching Hyperliquid L2 book");

        let response = self
            .client
            .post(&self.config.base_url)
            .json(&json!({ "type": "l2Book", "coin": ticker }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api(format!("{status}: {body}")));
        }

        let book: L2Book = response.json().await?;
        translate(book)
    }
}

/// L2 book response
#[derive(Debug, Deserialize)]
struct L2Book {
    /// Exchange timestamp in milliseconds
    time: Option<i64>,
    /// Two sides: levels[0] bids, levels[1] asks
    levels: Vec<Vec<L2Level>>,
}

#[derive(Debug, Deserialize)]
struct L2Level {
    px: String,
    sz: String,
}

fn parse_side(levels: &[L2Level]) -> Result<Vec<PriceLevel>, FetchError> {
    levels
        .iter()
        .map(|l| {
            let price = Decimal::from_str(&l.px)
                .map_err(|e| FetchError::Malformed(format!("bad px {:?}: {e}", l.px)))?;
            let size = Decimal::from_str(&l.sz)
                .map_err(|e| FetchError::Malformed(format!("bad sz {:?}: {e}", l.sz)))?;
            Ok(PriceLevel { price, size })
        })
        .collect()
}

fn translate(book: L2Book) -> Result<MarketSnapshot, FetchError> {
    if book.levels.len() < 2 {
        return Err(FetchError::Malformed(format!(
            "expected 2 sides, got {}",
            book.levels.len()
        )));
    }

    let bids = parse_side(&book.levels[0])?;
    let asks = parse_side(&book.levels[1])?;

    let timestamp = book
        .time
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .unwrap_or_else(Utc::now);

    Ok(MarketSnapshot::Orderbook(OrderbookSnapshot::new(
        bids, asks, timestamp,
    )))
}
