//! Oracle-venue costing
//!
//! No depth to walk: execution is guaranteed at the oracle price plus a
//! parametric spread, so cost is modeled analytically and scales linearly
//! with order size. Oracle venues have no depth limit, which means
//! insufficient-liquidity failures cannot happen here — that asymmetry with
//! orderbook venues is intentional and preserved.

use crate::snapshot::OracleSnapshot;
use rust_decimal::Decimal;

const BPS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Effective per-leg spread in basis points.
///
/// The half-spread is paid in both directions; skew is charged to the
/// disadvantaged direction only, so averaging the advantaged and
/// disadvantaged legs (the same round-trip averaging the orderbook walk
/// does) contributes half the skew.
pub(crate) fn per_leg_spread_bps(snapshot: &OracleSnapshot) -> Decimal {
    let skew = snapshot.skew_bps.unwrap_or(Decimal::ZERO);
    snapshot.spread_bps + skew / Decimal::TWO
}

/// Spread cost in USD for the full trade.
///
/// Doubled to approximate the round trip (entry + exit) unless the venue's
/// spread is one-sided (exit settles at the oracle).
pub(crate) fn spread_cost_usd(
    snapshot: &OracleSnapshot,
    order_size_usd: Decimal,
    one_sided: bool,
) -> Decimal {
    let per_leg = order_size_usd * per_leg_spread_bps(snapshot) / BPS;
    if one_sided {
        per_leg
    } else {
        per_leg * Decimal::TWO
    }
}

/// Average entry price after the spread is applied
pub(crate) fn effective_price(snapshot: &OracleSnapshot) -> Decimal {
    snapshot.oracle_price * (Decimal::ONE + per_leg_spread_bps(snapshot) / BPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn oracle(spread_bps: Decimal, skew_bps: Option<Decimal>) -> OracleSnapshot {
        OracleSnapshot {
            oracle_price: dec!(2400),
            spread_bps,
            skew_bps,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip_doubles_spread() {
        // 5 bps half-spread on $100k, round trip: 100000 * 0.0005 * 2 = $100
        let snap = oracle(dec!(5), None);
        assert_eq!(spread_cost_usd(&snap, dec!(100000), false), dec!(100));
    }

    #[test]
    fn test_one_sided_spread_not_doubled() {
        let snap = oracle(dec!(5), None);
        assert_eq!(spread_cost_usd(&snap, dec!(100000), true), dec!(50));
    }

    #[test]
    fn test_skew_averages_to_half() {
        // 4 bps spread + 2 bps skew on the disadvantaged leg averages to
        // 5 bps per leg
        let snap = oracle(dec!(4), Some(dec!(2)));
        assert_eq!(per_leg_spread_bps(&snap), dec!(5));
        assert_eq!(spread_cost_usd(&snap, dec!(100000), false), dec!(100));
    }

    #[test]
    fn test_cost_scales_linearly_with_size() {
        let snap = oracle(dec!(3), None);
        let small = spread_cost_usd(&snap, dec!(10000), false);
        let large = spread_cost_usd(&snap, dec!(1000000), false);
        assert_eq!(large, small * dec!(100));
    }

    #[test]
    fn test_zero_spread_is_free() {
        let snap = oracle(Decimal::ZERO, None);
        assert_eq!(spread_cost_usd(&snap, dec!(10000000), false), Decimal::ZERO);
    }

    #[test]
    fn test_effective_price_includes_spread() {
        // 2400 * (1 + 5bps) = 2401.2
        let snap = oracle(dec!(5), None);
        assert_eq!(effective_price(&snap), dec!(2401.2));
    }
}
