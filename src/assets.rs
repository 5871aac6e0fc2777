//! Asset catalog
//!
//! Static mapping of logical assets to per-venue tickers. The same product
//! trades under different symbols across venues (gold is PAXG on
//! Hyperliquid, XAU on Lighter, XAUUSD on Ostium and Avantis), and not
//! every venue lists every asset.

use crate::venues::VenueId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fee category an asset belongs to
///
/// Oracle venues publish their fee tables per product class rather than per
/// symbol, so fee resolution keys on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    CryptoMajor,
    CryptoAlt,
    Equities,
    Indices,
    ForexMajor,
    ForexMinor,
    Gold,
    Silver,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetCategory::CryptoMajor => "crypto-major",
            AssetCategory::CryptoAlt => "crypto-alt",
            AssetCategory::Equities => "equities",
            AssetCategory::Indices => "indices",
            AssetCategory::ForexMajor => "forex-major",
            AssetCategory::ForexMinor => "forex-minor",
            AssetCategory::Gold => "gold",
            AssetCategory::Silver => "silver",
        };
        f.write_str(name)
    }
}

/// A logical asset and its venue-native tickers
#[derive(Debug, Clone)]
pub struct Asset {
    /// Logical symbol (what the user asks for)
    pub symbol: &'static str,
    /// Fee category
    pub category: AssetCategory,
    tickers: [Option<&'static str>; 7],
}

impl Asset {
    /// Venue-native ticker, if the venue lists this asset
    pub fn ticker(&self, venue: VenueId) -> Option<&'static str> {
        let idx = match venue {
            VenueId::Hyperliquid => 0,
            VenueId::Lighter => 1,
            VenueId::Dydx => 2,
            VenueId::Paradex => 3,
            VenueId::Ostium => 4,
            VenueId::Avantis => 5,
            VenueId::Gmx => 6,
        };
        self.tickers[idx]
    }

    /// Venues that list this asset
    pub fn venues(&self) -> Vec<VenueId> {
        VenueId::all()
            .into_iter()
            .filter(|v| self.ticker(*v).is_some())
            .collect()
    }
}

macro_rules! asset {
    ($symbol:literal, $category:ident, [$hl:expr, $lt:expr, $dy:expr, $pd:expr, $os:expr, $av:expr, $gx:expr]) => {
        Asset {
            symbol: $symbol,
            category: AssetCategory::$category,
            tickers: [$hl, $lt, $dy, $pd, $os, $av, $gx],
        }
    };
}

/// Supported assets
///
/// Ticker order per entry: hyperliquid, lighter, dydx, paradex, ostium,
/// avantis, gmx. `None` means the venue does not list the asset.
static CATALOG: &[Asset] = &[
    // Crypto majors trade everywhere
    asset!("BTC", CryptoMajor, [Some("BTC"), Some("BTC"), Some("BTC-USD"), Some("BTC-USD-PERP"), Some("BTCUSD"), Some("BTCUSD"), Some("BTC")]),
    asset!("ETH", CryptoMajor, [Some("ETH"), Some("ETH"), Some("ETH-USD"), Some("ETH-USD-PERP"), Some("ETHUSD"), Some("ETHUSD"), Some("ETH")]),
    asset!("SOL", CryptoMajor, [Some("SOL"), Some("SOL"), Some("SOL-USD"), Some("SOL-USD-PERP"), Some("SOLUSD"), Some("SOLUSD"), Some("SOL")]),
    // Commodities
    asset!("GOLD", Gold, [Some("PAXG"), Some("XAU"), None, None, Some("XAUUSD"), Some("XAUUSD"), None]),
    asset!("SILVER", Silver, [Some("XAGUSD"), Some("XAG"), None, None, Some("XAGUSD"), Some("XAGUSD"), None]),
    // Mag7 + HOOD
    asset!("AAPL", Equities, [Some("AAPL"), Some("AAPL"), None, None, Some("AAPL"), Some("AAPL"), None]),
    asset!("MSFT", Equities, [Some("MSFT"), Some("MSFT"), None, None, Some("MSFT"), Some("MSFT"), None]),
    asset!("GOOGL", Equities, [Some("GOOGL"), Some("GOOGL"), None, None, Some("GOOG"), Some("GOOG"), None]),
    asset!("AMZN", Equities, [Some("AMZN"), Some("AMZN"), None, None, Some("AMZN"), Some("AMZN"), None]),
    asset!("META", Equities, [Some("META"), Some("META"), None, None, Some("META"), Some("META"), None]),
    asset!("TSLA", Equities, [Some("TSLA"), Some("TSLA"), None, None, Some("TSLA"), Some("TSLA"), None]),
    asset!("NVDA", Equities, [Some("NVDA"), Some("NVDA"), None, None, Some("NVDA"), Some("NVDA"), None]),
    asset!("HOOD", Equities, [Some("HOOD"), Some("HOOD"), None, None, Some("HOOD"), Some("HOOD"), None]),
    // Indices
    asset!("SPY", Indices, [Some("SPY"), Some("SPY"), None, None, Some("SPY"), Some("SPYUSD"), None]),
    asset!("QQQ", Indices, [Some("QQQ"), Some("QQQ"), None, None, Some("QQQ"), Some("QQQUSD"), None]),
    // Forex majors
    asset!("EURUSD", ForexMajor, [Some("EURUSD"), Some("EURUSD"), None, None, Some("EURUSD"), Some("EURUSD"), None]),
    asset!("USDJPY", ForexMajor, [Some("USDJPY"), Some("USDJPY"), None, None, Some("USDJPY"), Some("USDJPY"), None]),
    asset!("GBPUSD", ForexMajor, [Some("GBPUSD"), Some("GBPUSD"), None, None, Some("GBPUSD"), Some("GBPUSD"), None]),
];

/// Full asset catalog
pub fn catalog() -> &'static [Asset] {
    CATALOG
}

/// Look up an asset by logical symbol (case-insensitive)
pub fn find(symbol: &str) -> Option<&'static Asset> {
    CATALOG
        .iter()
        .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_case_insensitive() {
        assert_eq!(find("gold").unwrap().symbol, "GOLD");
        assert_eq!(find("BTC").unwrap().symbol, "BTC");
        assert!(find("DOGE").is_none());
    }

    #[test]
    fn test_gold_ticker_mapping() {
        let gold = find("GOLD").unwrap();
        assert_eq!(gold.ticker(VenueId::Hyperliquid), Some("PAXG"));
        assert_eq!(gold.ticker(VenueId::Lighter), Some("XAU"));
        assert_eq!(gold.ticker(VenueId::Ostium), Some("XAUUSD"));
        assert_eq!(gold.ticker(VenueId::Dydx), None);
    }

    #[test]
    fn test_btc_listed_everywhere() {
        let btc = find("BTC").unwrap();
        assert_eq!(btc.venues().len(), 7);
    }

    #[test]
    fn test_equities_skip_crypto_only_venues() {
        let aapl = find("AAPL").unwrap();
        let venues = aapl.venues();
        assert!(venues.contains(&VenueId::Hyperliquid));
        assert!(venues.contains(&VenueId::Avantis));
        assert!(!venues.contains(&VenueId::Dydx));
        assert!(!venues.contains(&VenueId::Gmx));
    }

    #[test]
    fn test_googl_differs_across_venues() {
        let googl = find("GOOGL").unwrap();
        assert_eq!(googl.ticker(VenueId::Lighter), Some("GOOGL"));
        assert_eq!(googl.ticker(VenueId::Ostium), Some("GOOG"));
    }

    #[test]
    fn test_categories() {
        assert_eq!(find("SPY").unwrap().category, AssetCategory::Indices);
        assert_eq!(find("EURUSD").unwrap().category, AssetCategory::ForexMajor);
        assert_eq!(find("SILVER").unwrap().category, AssetCategory::Silver);
    }
}
