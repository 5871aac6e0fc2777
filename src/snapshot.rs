//! Normalized market snapshot model
//!
//! Every venue adapter translates its native payload into a `MarketSnapshot`
//! so the cost engine never sees a venue-specific wire format.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price level in an order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price at this level
    pub price: Decimal,
    /// Total size available (base units)
    pub size: Decimal,
}

impl PriceLevel {
    /// Notional value resting at this level (price * size)
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

/// L2 depth snapshot for an orderbook venue
///
/// Bids are sorted best (highest) to worst, asks best (lowest) to worst.
/// A venue with no resting depth on a side carries an empty vector for that
/// side; levels are never fabricated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderbookSnapshot {
    /// Bid levels, descending price
    pub bids: Vec<PriceLevel>,
    /// Ask levels, ascending price
    pub asks: Vec<PriceLevel>,
    /// Midpoint between best bid and best ask
    pub mid_price: Decimal,
    /// Snapshot timestamp
    pub timestamp: DateTime<Utc>,
}

impl OrderbookSnapshot {
    /// Build a snapshot from raw sides, sorting and dropping non-positive
    /// levels, and deriving the mid price from the top of book.
    pub fn new(
        mut bids: Vec<PriceLevel>,
        mut asks: Vec<PriceLevel>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        bids.retain(|l| l.price > Decimal::ZERO && l.size > Decimal::ZERO);
        asks.retain(|l| l.price > Decimal::ZERO && l.size > Decimal::ZERO);
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));

        let mid_price = match (bids.first(), asks.first()) {
            (Some(bid), Some(ask)) => (bid.price + ask.price) / Decimal::TWO,
            // One-sided book: the only observable reference price
            (Some(bid), None) => bid.price,
            (None, Some(ask)) => ask.price,
            (None, None) => Decimal::ZERO,
        };

        Self {
            bids,
            asks,
            mid_price,
            timestamp,
        }
    }

    /// Best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    /// Best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// Quoted spread in basis points, if both sides exist
    pub fn spread_bps(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if self.mid_price > Decimal::ZERO => {
                Some((ask - bid) / self.mid_price * Decimal::from(10_000))
            }
            _ => None,
        }
    }

    /// Total notional resting on one side
    pub fn side_depth_usd(&self, side: &[PriceLevel]) -> Decimal {
        side.iter().map(|l| l.notional()).sum()
    }
}

/// Market state for an oracle-priced venue
///
/// No visible depth: execution happens at the oracle price plus a
/// parametric spread, optionally skewed against one direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSnapshot {
    /// Oracle (reference feed) price
    pub oracle_price: Decimal,
    /// Half-spread in basis points, applied symmetrically
    pub spread_bps: Decimal,
    /// Extra basis points charged to the disadvantaged direction
    pub skew_bps: Option<Decimal>,
    /// Snapshot timestamp
    pub timestamp: DateTime<Utc>,
}

/// Normalized market state the cost engine operates on
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MarketSnapshot {
    /// Visible depth ladder (central-limit orderbook venue)
    Orderbook(OrderbookSnapshot),
    /// Oracle price + spread parameters (oracle-priced venue)
    Oracle(OracleSnapshot),
}

impl MarketSnapshot {
    /// Snapshot timestamp, regardless of variant
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            MarketSnapshot::Orderbook(book) => book.timestamp,
            MarketSnapshot::Oracle(oracle) => oracle.timestamp,
        }
    }

    /// Whether this snapshot came from an orderbook venue
    pub fn is_orderbook(&self) -> bool {
        matches!(self, MarketSnapshot::Orderbook(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(price: Decimal, size: Decimal) -> PriceLevel {
        PriceLevel { price, size }
    }

    #[test]
    fn test_mid_price_from_top_of_book() {
        let book = OrderbookSnapshot::new(
            vec![level(dec!(99.8), dec!(10))],
            vec![level(dec!(100.0), dec!(5))],
            Utc::now(),
        );
        assert_eq!(book.mid_price, dec!(99.9));
        assert_eq!(book.best_bid(), Some(dec!(99.8)));
        assert_eq!(book.best_ask(), Some(dec!(100.0)));
    }

    #[test]
    fn test_sides_are_sorted() {
        let book = OrderbookSnapshot::new(
            vec![level(dec!(99.0), dec!(1)), level(dec!(99.5), dec!(1))],
            vec![level(dec!(101.0), dec!(1)), level(dec!(100.5), dec!(1))],
            Utc::now(),
        );
        assert_eq!(book.bids[0].price, dec!(99.5));
        assert_eq!(book.asks[0].price, dec!(100.5));
    }

    #[test]
    fn test_non_positive_levels_dropped() {
        let book = OrderbookSnapshot::new(
            vec![level(dec!(99.0), dec!(0)), level(dec!(98.0), dec!(2))],
            vec![level(dec!(0), dec!(5))],
            Utc::now(),
        );
        assert_eq!(book.bids.len(), 1);
        assert!(book.asks.is_empty());
    }

    #[test]
    fn test_empty_book_has_zero_mid() {
        let book = OrderbookSnapshot::new(vec![], vec![], Utc::now());
        assert_eq!(book.mid_price, Decimal::ZERO);
        assert!(book.best_bid().is_none());
        assert!(book.spread_bps().is_none());
    }

    #[test]
    fn test_one_sided_book_uses_remaining_side() {
        let book = OrderbookSnapshot::new(vec![], vec![level(dec!(100.0), dec!(5))], Utc::now());
        assert_eq!(book.mid_price, dec!(100.0));
        assert!(book.spread_bps().is_none());
    }

    #[test]
    fn test_spread_bps() {
        let book = OrderbookSnapshot::new(
            vec![level(dec!(99.95), dec!(1))],
            vec![level(dec!(100.05), dec!(1))],
            Utc::now(),
        );
        // 0.10 spread on a 100.00 mid = 10 bps
        assert_eq!(book.spread_bps(), Some(dec!(10)));
    }

    #[test]
    fn test_side_depth() {
        let book = OrderbookSnapshot::new(
            vec![],
            vec![level(dec!(100), dec!(5)), level(dec!(101), dec!(10))],
            Utc::now(),
        );
        assert_eq!(book.side_depth_usd(&book.asks), dec!(1510));
    }

    #[test]
    fn test_snapshot_timestamp_accessor() {
        let ts = Utc::now();
        let oracle = MarketSnapshot::Oracle(OracleSnapshot {
            oracle_price: dec!(2400),
            spread_bps: dec!(3),
            skew_bps: None,
            timestamp: ts,
        });
        assert_eq!(oracle.timestamp(), ts);
        assert!(!oracle.is_orderbook());
    }
}
