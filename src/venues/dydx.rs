//! dYdX v4 indexer adapter
//!
//! `GET /v4/orderbooks/perpetualMarket/{ticker}` returns both sides as
//! `{price, size}` decimal strings, already sorted best-first.

use super::{FetchError, VenueAdapter, VenueId};
use crate::snapshot::{MarketSnapshot, OrderbookSnapshot, PriceLevel};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// dYdX indexer base URL
pub const DYDX_API_URL: &str = "https://indexer.dydx.trade/v4";

/// Configuration for the dYdX client
#[derive(Debug, Clone)]
pub struct DydxConfig {
    /// Indexer base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for DydxConfig {
    fn default() -> Self {
        Self {
            base_url: DYDX_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the dYdX v4 indexer
pub struct DydxClient {
    config: DydxConfig,
    client: Client,
}

impl DydxClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(DydxConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: DydxConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for DydxClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueAdapter for DydxClient {
    fn id(&self) -> VenueId {
        VenueId::Dydx
    }

    async fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, FetchError> {
        let url = format!(
            "{}/orderbooks/perpetualMarket/{}",
            self.config.base_url, ticker
        );
        tracing::debug!(market = ticker, "Fetching dYdX orderbook");

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::MarketNotFound(ticker.to_string()));
        }
        if !response.status().is_success() {
            return Err(FetchError::Api(format!(
                "indexer returned {}",
                response.status()
            )));
        }

        let book: Orderbook = response.json().await?;
        translate(book)
    }
}

#[derive(Debug, Deserialize)]
struct Orderbook {
    bids: Vec<Level>,
    asks: Vec<Level>,
}

#[derive(Debug, Deserialize)]
struct Level {
    price: String,
    size: String,
}

fn parse_side(levels: &[Level]) -> Result<Vec<PriceLevel>, FetchError> {
    levels
        .iter()
        .map(|l| {
            let price = Decimal::from_str(&l.price)
                .map_err(|e| FetchError::Malformed(format!("bad price {:?}: {e}", l.price)))?;
            let size = Decimal::from_str(&l.size)
                .map_err(|e| FetchError::Malformed(format!("bad size {:?}: {e}", l.size)))?;
            Ok(PriceLevel { price, size })
        })
        .collect()
}

fn translate(book: Orderbook) -> Result<MarketSnapshot, FetchError> {
    let bids = parse_side(&book.bids)?;
    let asks = parse_side(&book.asks)?;

    Ok(MarketSnapshot::Orderbook(OrderbookSnapshot::new(
        bids,
        asks,
        Utc::now(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_translate_orderbook() {
        let payload = r#"{
            "bids": [{"price": "64998", "size": "1.2"}, {"price": "64990", "size": "4.0"}],
            "asks": [{"price": "65002", "size": "0.7"}, {"price": "65010", "size": "3.1"}]
        }"#;

        let book: Orderbook = serde_json::from_str(payload).unwrap();
        let MarketSnapshot::Orderbook(book) = translate(book).unwrap() else {
            panic!("expected orderbook snapshot");
        };
        assert_eq!(book.mid_price, dec!(65000));
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.asks.len(), 2);
    }

    #[test]
    fn test_translate_rejects_garbage() {
        let payload = r#"{"bids": [{"price": "sixty", "size": "1"}], "asks": []}"#;
        let book: Orderbook = serde_json::from_str(payload).unwrap();
        assert!(matches!(translate(book), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn test_config_default() {
        let config = DydxConfig::default();
        assert_eq!(config.base_url, DYDX_API_URL);
    }
}
