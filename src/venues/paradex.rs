//! Paradex orderbook adapter
//!
//! `GET /v1/orderbook/{market}` returns sides as `[price, size]` string
//! pairs plus a millisecond update timestamp.

use super::{FetchError, VenueAdapter, VenueId};
use crate::snapshot::{MarketSnapshot, OrderbookSnapshot, PriceLevel};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Paradex REST API base
pub const PARADEX_API_URL: &str = "https://api.prod.paradex.trade/v1";

/// Configuration for the Paradex client
#[derive(Debug, Clone)]
pub struct ParadexConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ParadexConfig {
    fn default() -> Self {
        Self {
            base_url: PARADEX_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Paradex REST API
pub struct ParadexClient {
    config: ParadexConfig,
    client: Client,
}

impl ParadexClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(ParadexConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ParadexConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for ParadexClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueAdapter for ParadexClient {
    fn id(&self) -> VenueId {
        VenueId::Paradex
    }

    async fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, FetchError> {
        let url = format!("{}/orderbook/{}", self.config.base_url, ticker);
        tracing::debug!(market = ticker, "Fetching Paradex orderbook");

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::MarketNotFound(ticker.to_string()));
        }
        if !response.status().is_success() {
            return Err(FetchError::Api(format!(
                "orderbook returned {}",
                response.status()
            )));
        }

        let book: Orderbook = response.json().await?;
        translate(book)
    }
}

#[derive(Debug, Deserialize)]
struct Orderbook {
    /// Milliseconds since epoch
    last_updated_at: Option<i64>,
    bids: Vec<(String, String)>,
    asks: Vec<(String, String)>,
}

fn parse_side(levels: &[(String, String)]) -> Result<Vec<PriceLevel>, FetchError> {
    levels
        .iter()
        .map(|(price, size)| {
            let price = Decimal::from_str(price)
                .map_err(|e| FetchError::Malformed(format!("bad price {price:?}: {e}")))?;
            let size = Decimal::from_str(size)
                .map_err(|e| FetchError::Malformed(format!("bad size {size:?}: {e}")))?;
            Ok(PriceLevel { price, size })
        })
        .collect()
}

fn translate(book: Orderbook) -> Result<MarketSnapshot, FetchError> {
    let bids = parse_side(&book.bids)?;
    let asks = parse_side(&book.asks)?;

    let timestamp = book
        .last_updated_at
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .unwrap_or_else(Utc::now);

    Ok(MarketSnapshot::Orderbook(OrderbookSnapshot::new(
        bids, asks, timestamp,
    )))
}
