//! GMX oracle-price adapter
//!
//! GMX publishes signed min/max prices per token; execution happens inside
//! that band, so the half-spread falls straight out of (max - min) / 2
//! around the midpoint.

use super::{FetchError, VenueAdapter, VenueId};
use crate::snapshot::{MarketSnapshot, OracleSnapshot};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// GMX price API endpoint (Arbitrum deployment)
pub const GMX_TICKERS_URL: &str = "https://arbitrum-api.gmxinfra.io/prices/tickers";

/// Configuration for the GMX client
#[derive(Debug, Clone)]
pub struct GmxConfig {
    /// Tickers endpoint URL
    pub tickers_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GmxConfig {
    fn default() -> Self {
        Self {
            tickers_url: GMX_TICKERS_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the GMX price API
pub struct GmxClient {
    config: GmxConfig,
    client: Client,
}

impl GmxClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(GmxConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: GmxConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for GmxClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueAdapter for GmxClient {
    fn id(&self) -> VenueId {
        VenueId::Gmx
    }

    async fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, FetchError> {
        tracing::debug!(token = ticker, "Fetching GMX signed prices");

        let response = self.client.get(&self.config.tickers_url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Api(format!(
                "tickers returned {}",
                response.status()
            )));
        }

        let tickers: Vec<SignedPrice> = response.json().await?;
        translate(tickers, ticker)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignedPrice {
    token_symbol: String,
    min_price: Decimal,
    max_price: Decimal,
    /// Oracle update time in milliseconds
    updated_at: Option<i64>,
}

fn translate(tickers: Vec<SignedPrice>, ticker: &str) -> Result<MarketSnapshot, FetchError> {
    let signed = tickers
        .into_iter()
        .find(|t| t.token_symbol.eq_ignore_ascii_case(ticker))
        .ok_or_else(|| FetchError::MarketNotFound(ticker.to_string()))?;

    if signed.min_price <= Decimal::ZERO || signed.max_price < signed.min_price {
        return Err(FetchError::Malformed(format!(
            "bad price band for {ticker}: min {} max {}",
            signed.min_price, signed.max_price
        )));
    }

    let mid = (signed.min_price + signed.max_price) / Decimal::TWO;
    let spread_bps = (signed.max_price - signed.min_price) / Decimal::TWO / mid
        * Decimal::from(10_000);

    let timestamp = signed
        .updated_at
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .unwrap_or_else(Utc::now);

    Ok(MarketSnapshot::Oracle(OracleSnapshot {
        oracle_price: mid,
        spread_bps,
        skew_bps: None,
        timestamp,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tickers() -> Vec<SignedPrice> {
        serde_json::from_str(
            r#"[
                {"tokenSymbol": "BTC", "minPrice": 64987.0, "maxPrice": 65013.0, "updatedAt": 1704067200000},
                {"tokenSymbol": "ETH", "minPrice": 3400.0, "maxPrice": 3400.0, "updatedAt": null}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_spread_from_price_band() {
        let MarketSnapshot::Oracle(oracle) = translate(tickers(), "BTC").unwrap() else {
            panic!("expected oracle snapshot");
        };
        assert_eq!(oracle.oracle_price, dec!(65000.0));
        // (65013 - 64987) / 2 = 13 on a 65000 mid = 2 bps
        assert_eq!(oracle.spread_bps, dec!(2));
        assert_eq!(oracle.timestamp.timestamp_millis(), 1704067200000);
    }

    #[test]
    fn test_tight_band_means_zero_spread() {
        let MarketSnapshot::Oracle(oracle) = translate(tickers(), "ETH").unwrap() else {
            panic!("expected oracle snapshot");
        };
        assert_eq!(oracle.spread_bps, Decimal::ZERO);
    }

    #[test]
    fn test_unlisted_token() {
        assert!(matches!(
            translate(tickers(), "PAXG"),
            Err(FetchError::MarketNotFound(_))
        ));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let bad: Vec<SignedPrice> = serde_json::from_str(
            r#"[{"tokenSymbol": "BTC", "minPrice": 65013.0, "maxPrice": 64987.0, "updatedAt": null}]"#,
        )
        .unwrap();
        assert!(matches!(translate(bad, "BTC"), Err(FetchError::Malformed(_))));
    }
}
