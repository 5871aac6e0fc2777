//! Venue adapters
//!
//! One adapter per supported venue. Each adapter owns its venue's wire
//! format and translates fetched payloads into a normalized
//! [`MarketSnapshot`](crate::snapshot::MarketSnapshot); the rest of the
//! system never depends on a concrete venue type.

mod avantis;
mod dydx;
mod gmx;
mod hyperliquid;
mod lighter;
mod ostium;
mod paradex;

pub use avantis::AvantisClient;
pub use dydx::DydxClient;
pub use gmx::GmxClient;
pub use hyperliquid::HyperliquidClient;
pub use lighter::LighterClient;
pub use ostium::OstiumClient;
pub use paradex::ParadexClient;

use crate::snapshot::MarketSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Supported venues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueId {
    Hyperliquid,
    Lighter,
    Dydx,
    Paradex,
    Ostium,
    Avantis,
    Gmx,
}

impl VenueId {
    /// All supported venues, in display order
    pub fn all() -> [VenueId; 7] {
        [
            VenueId::Hyperliquid,
            VenueId::Lighter,
            VenueId::Dydx,
            VenueId::Paradex,
            VenueId::Ostium,
            VenueId::Avantis,
            VenueId::Gmx,
        ]
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            VenueId::Hyperliquid => "hyperliquid",
            VenueId::Lighter => "lighter",
            VenueId::Dydx => "dydx",
            VenueId::Paradex => "paradex",
            VenueId::Ostium => "ostium",
            VenueId::Avantis => "avantis",
            VenueId::Gmx => "gmx",
        }
    }

    /// Whether this venue exposes a visible depth ladder
    pub fn is_orderbook(&self) -> bool {
        matches!(
            self,
            VenueId::Hyperliquid | VenueId::Lighter | VenueId::Dydx | VenueId::Paradex
        )
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VenueId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hyperliquid" => Ok(VenueId::Hyperliquid),
            "lighter" => Ok(VenueId::Lighter),
            "dydx" => Ok(VenueId::Dydx),
            "paradex" => Ok(VenueId::Paradex),
            "ostium" => Ok(VenueId::Ostium),
            "avantis" => Ok(VenueId::Avantis),
            "gmx" => Ok(VenueId::Gmx),
            other => Err(format!("unknown venue: {other}")),
        }
    }
}

/// Errors raised while fetching or translating venue market data
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport or HTTP-status failure
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The venue answered but reported an error
    #[error("venue error: {0}")]
    Api(String),
    /// The payload could not be translated into a snapshot
    #[error("malformed payload: {0}")]
    Malformed(String),
    /// The asset has no market on this venue
    #[error("market not found: {0}")]
    MarketNotFound(String),
    /// The fetch did not complete within the configured deadline
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Capability interface every venue adapter implements
#[async_trait]
pub trait VenueAdapter: Send + Sync {
    /// Which venue this adapter talks to
    fn id(&self) -> VenueId;

    /// Fetch current market state for a venue-native ticker
    async fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, FetchError>;
}

/// Construct the full adapter set with default endpoints
pub fn default_adapters() -> Vec<Arc<dyn VenueAdapter>> {
    vec![
        Arc::new(HyperliquidClient::new()),
        Arc::new(LighterClient::new()),
        Arc::new(DydxClient::new()),
        Arc::new(ParadexClient::new()),
        Arc::new(OstiumClient::new()),
        Arc::new(AvantisClient::new()),
        Arc::new(GmxClient::new()),
    ]
}
