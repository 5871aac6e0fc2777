//! Ostium oracle-price adapter
//!
//! Ostium executes against an oracle feed rather than a book. The metadata
//! backend publishes the latest price for every listed pair in one payload;
//! when the feed carries bid/ask, the half-spread is derived from it,
//! otherwise a configured estimate applies.

use super::{FetchError, VenueAdapter, VenueId};
use crate::snapshot::{MarketSnapshot, OracleSnapshot};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::time::Duration;

/// Ostium price publish endpoint
pub const OSTIUM_PRICES_URL: &str =
    "https://metadata-backend.ostium.io/PricePublish/latest-prices";

/// Configuration for the Ostium client
#[derive(Debug, Clone)]
pub struct OstiumConfig {
    /// Latest-prices endpoint URL
    pub prices_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Half-spread estimate used when the feed has no bid/ask
    pub default_spread_bps: Decimal,
}

impl Default for OstiumConfig {
    fn default() -> Self {
        Self {
            prices_url: OSTIUM_PRICES_URL.to_string(),
            timeout: Duration::from_secs(10),
            default_spread_bps: dec!(3.0),
        }
    }
}

/// Client for the Ostium price feed
pub struct OstiumClient {
    config: OstiumConfig,
    client: Client,
}

impl OstiumClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(OstiumConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: OstiumConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for OstiumClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueAdapter for OstiumClient {
    fn id(&self) -> VenueId {
        VenueId::Ostium
    }

    async fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, FetchError> {
        tracing::debug!(pair = ticker, "Fetching Ostium oracle price");

        let response = self.client.get(&self.config.prices_url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Api(format!(
                "latest-prices returned {}",
                response.status()
            )));
        }

        let prices: Vec<FeedPrice> = response.json().await?;
        translate(prices, ticker, self.config.default_spread_bps)
    }
}

#[derive(Debug, Deserialize)]
struct FeedPrice {
    pair: String,
    price: Decimal,
    bid: Option<Decimal>,
    ask: Option<Decimal>,
    /// Feed timestamp in milliseconds
    timestamp: Option<i64>,
}

fn translate(
    prices: Vec<FeedPrice>,
    ticker: &str,
    default_spread_bps: Decimal,
) -> Result<MarketSnapshot, FetchError> {
    let feed = prices
        .into_iter()
        .find(|p| p.pair.eq_ignore_ascii_case(ticker))
        .ok_or_else(|| FetchError::MarketNotFound(ticker.to_string()))?;

    if feed.price <= Decimal::ZERO {
        return Err(FetchError::Malformed(format!(
            "non-positive oracle price for {ticker}: {}",
            feed.price
        )));
    }

    let spread_bps = match (feed.bid, feed.ask) {
        (Some(bid), Some(ask)) if ask >= bid => {
            (ask - bid) / Decimal::TWO / feed.price * Decimal::from(10_000)
        }
        _ => default_spread_bps,
    };

    let timestamp = feed
        .timestamp
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .unwrap_or_else(Utc::now);

    Ok(MarketSnapshot::Oracle(OracleSnapshot {
        oracle_price: feed.price,
        spread_bps,
        skew_bps: None,
        timestamp,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_json() -> Vec<FeedPrice> {
        serde_json::from_str(
            r#"[
                {"pair": "XAUUSD", "price": 2000.0, "bid": 1999.6, "ask": 2000.4, "timestamp": 1704067200000},
                {"pair": "EURUSD", "price": 1.085, "bid": null, "ask": null, "timestamp": null}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_spread_from_bid_ask() {
        let snapshot = translate(feed_json(), "XAUUSD", dec!(3.0)).unwrap();
        let MarketSnapshot::Oracle(oracle) = snapshot else {
            panic!("expected oracle snapshot");
        };
        assert_eq!(oracle.oracle_price, dec!(2000.0));
        // (2000.4 - 1999.6) / 2 / 2000 = 2 bps
        assert_eq!(oracle.spread_bps, dec!(2));
        assert_eq!(oracle.timestamp.timestamp_millis(), 1704067200000);
    }

    #[test]
    fn test_default_spread_when_feed_has_no_quotes() {
        let snapshot = translate(feed_json(), "EURUSD", dec!(3.0)).unwrap();
        let MarketSnapshot::Oracle(oracle) = snapshot else {
            panic!("expected oracle snapshot");
        };
        assert_eq!(oracle.spread_bps, dec!(3.0));
    }

    #[test]
    fn test_pair_lookup_case_insensitive() {
        assert!(translate(feed_json(), "xauusd", dec!(3.0)).is_ok());
    }

    #[test]
    fn test_unlisted_pair() {
        let err = translate(feed_json(), "USDJPY", dec!(3.0)).unwrap_err();
        assert!(matches!(err, FetchError::MarketNotFound(_)));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let prices: Vec<FeedPrice> =
            serde_json::from_str(r#"[{"pair": "XAUUSD", "price": 0, "bid": null, "ask": null, "timestamp": null}]"#)
                .unwrap();
        assert!(matches!(
            translate(prices, "XAUUSD", dec!(3.0)),
            Err(FetchError::Malformed(_))
        ));
    }
}
