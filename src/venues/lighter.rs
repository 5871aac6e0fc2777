//! Lighter orderbook adapter
//!
//! Two-step fetch: `orderBookDetails` resolves the numeric market id for a
//! symbol, then `orderBookOrders` returns resting orders as
//! `{price, remaining_base_amount}` strings. Sides can arrive unsorted.

use super::{FetchError, VenueAdapter, VenueId};
use crate::snapshot::{MarketSnapshot, OrderbookSnapshot, PriceLevel};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Lighter mainnet API base
pub const LIGHTER_API_URL: &str = "https://mainnet.zklighter.elliot.ai/api/v1";

/// Depth levels requested per side
const DEPTH_LIMIT: u32 = 50;

/// Configuration for the Lighter client
#[derive(Debug, Clone)]
pub struct LighterConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LighterConfig {
    fn default() -> Self {
        Self {
            base_url: LIGHTER_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Lighter REST API
pub struct LighterClient {
    config: LighterConfig,
    client: Client,
}

impl LighterClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(LighterConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: LighterConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Resolve the active market id for a symbol
    async fn resolve_market_id(&self, symbol: &str) -> Result<u64, FetchError> {
        let url = format!("{}/orderBookDetails", self.config.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Api(format!(
                "orderBookDetails returned {}",
                response.status()
            )));
        }

        let details: MarketDetails = response.json().await?;
        details
            .order_book_details
            .into_iter()
            .find(|m| m.symbol.eq_ignore_ascii_case(symbol) && m.status == "active")
            .map(|m| m.market_id)
            .ok_or_else(|| FetchError::MarketNotFound(symbol.to_string()))
    }
}

impl Default for LighterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueAdapter for LighterClient {
    fn id(&self) -> VenueId {
        VenueId::Lighter
    }

    async fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, FetchError> {
        let market_id = self.resolve_market_id(ticker).await?;
        tracing::debug!(symbol = ticker, market_id, "Fetching Lighter orderbook");

        let url = format!("{}/orderBookOrders", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("market_id", market_id.to_string()), ("limit", DEPTH_LIMIT.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Api(format!(
                "orderBookOrders returned {}",
                response.status()
            )));
        }

        let orders: BookOrders = response.json().await?;
        translate(orders)
    }
}

#[derive(Debug, Deserialize)]
struct MarketDetails {
    order_book_details: Vec<MarketDetail>,
}

#[derive(Debug, Deserialize)]
struct MarketDetail {
    symbol: String,
    market_id: u64,
    status: String,
}

#[derive(Debug, Deserialize)]
struct BookOrders {
    #[serde(default)]
    bids: Vec<RestingOrder>,
    #[serde(default)]
    asks: Vec<RestingOrder>,
}

#[derive(Debug, Deserialize)]
struct RestingOrder {
    price: String,
    remaining_base_amount: String,
}

fn parse_side(orders: &[RestingOrder]) -> Result<Vec<PriceLevel>, FetchError> {
    orders
        .iter()
        .map(|o| {
            let price = Decimal::from_str(&o.price)
                .map_err(|e| FetchError::Malformed(format!("bad price {:?}: {e}", o.price)))?;
            let size = Decimal::from_str(&o.remaining_base_amount).map_err(|e| {
                FetchError::Malformed(format!("bad size {:?}: {e}", o.remaining_base_amount))
            })?;
            Ok(PriceLevel { price, size })
        })
        .collect()
}

fn translate(orders: BookOrders) -> Result<MarketSnapshot, FetchError> {
    let bids = parse_side(&orders.bids)?;
    let asks = parse_side(&orders.asks)?;

    // Lighter has no snapshot timestamp; the book is live at fetch time
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
    fn test_translate_sorts_unsorted_sides() {
        let payload = r#"{
            "bids": [
                {"price": "2061.0", "remaining_base_amount": "3.0"},
                {"price": "2062.0", "remaining_base_amount": "1.5"}
            ],
            "asks": [
                {"price": "2064.0", "remaining_base_amount": "2.0"},
                {"price": "2063.0", "remaining_base_amount": "0.8"}
            ]
        }"#;

        let orders: BookOrders = serde_json::from_str(payload).unwrap();
        let MarketSnapshot::Orderbook(book) = translate(orders).unwrap() else {
            panic!("expected orderbook snapshot");
        };
        assert_eq!(book.best_bid(), Some(dec!(2062.0)));
        assert_eq!(book.best_ask(), Some(dec!(2063.0)));
        assert_eq!(book.mid_price, dec!(2062.5));
    }

    #[test]
    fn test_translate_missing_sides_default_empty() {
        let orders: BookOrders = serde_json::from_str("{}").unwrap();
        let MarketSnapshot::Orderbook(book) = translate(orders).unwrap() else {
            panic!("expected orderbook snapshot");
        };
        assert!(book.bids.is_empty());
        assert!(book.asks.is_empty());
    }

    #[test]
    fn test_translate_bad_amount() {
        let payload = r#"{
            "bids": [{"price": "2061.0", "remaining_base_amount": "n/a"}],
            "asks": []
        }"#;
        let orders: BookOrders = serde_json::from_str(payload).unwrap();
        assert!(matches!(translate(orders), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn test_market_details_lookup_shape() {
        let payload = r#"{
            "order_book_details": [
                {"symbol": "XAU", "market_id": 9, "status": "active"},
                {"symbol": "XAG", "market_id": 10, "status": "frozen"}
            ]
        }"#;
        let details: MarketDetails = serde_json::from_str(payload).unwrap();
        let active = details
            .order_book_details
            .iter()
            .find(|m| m.symbol == "XAU" && m.status == "active")
            .unwrap();
        assert_eq!(active.market_id, 9);
    }
}
