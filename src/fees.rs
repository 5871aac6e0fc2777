//! Venue fee schedules
//!
//! Static per-venue fee rules: opening/closing rates as fractions of
//! notional, optional volume-tier discounts, and the odd flat per-trade fee.
//! Orderbook venues charge a symmetric taker rate; oracle venues publish
//! per-category rates that can differ between open and close.

use crate::assets::AssetCategory;
use crate::venues::VenueId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One volume tier: the rate charged at or above a trailing-volume threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTier {
    /// 30-day trailing volume required to qualify (USD)
    pub volume_threshold_usd: Decimal,
    /// Taker rate at this tier (fraction of notional)
    pub rate: Decimal,
}

/// Fee rules for one venue and asset category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Opening fee as a fraction of notional
    pub open_fee_rate: Decimal,
    /// Closing fee as a fraction of notional
    pub close_fee_rate: Decimal,
    /// Volume tiers, ascending by threshold; highest qualifying tier wins
    pub tiers: Option<Vec<FeeTier>>,
    /// Flat fee charged once per trade regardless of size (USD)
    pub flat_fee_usd: Decimal,
    /// Whether the venue's cost comes from walking a depth ladder
    pub is_orderbook_venue: bool,
    /// Spread is paid on entry only (exit settles at the reference price)
    pub one_sided_spread: bool,
}

impl FeeSchedule {
    /// Symmetric taker schedule for an orderbook venue
    fn taker(rate: Decimal, tiers: Option<Vec<FeeTier>>) -> Self {
        Self {
            open_fee_rate: rate,
            close_fee_rate: rate,
            tiers,
            flat_fee_usd: Decimal::ZERO,
            is_orderbook_venue: true,
            one_sided_spread: false,
        }
    }

    /// Oracle-venue schedule with independent open/close rates
    fn oracle(open: Decimal, close: Decimal) -> Self {
        Self {
            open_fee_rate: open,
            close_fee_rate: close,
            tiers: None,
            flat_fee_usd: Decimal::ZERO,
            is_orderbook_venue: false,
            one_sided_spread: false,
        }
    }

    fn with_flat_fee(mut self, flat: Decimal) -> Self {
        self.flat_fee_usd = flat;
        self
    }

    fn entry_only_spread(mut self) -> Self {
        self.one_sided_spread = true;
        self
    }

    /// Tier-resolved rate: the highest tier whose threshold does not exceed
    /// the caller's trailing volume. With no volume context the base rate
    /// applies.
    fn tier_rate(&self, base: Decimal, trailing_volume: Option<Decimal>) -> Decimal {
        let (Some(tiers), Some(volume)) = (self.tiers.as_ref(), trailing_volume) else {
            return base;
        };
        tiers
            .iter()
            .filter(|t| t.volume_threshold_usd <= volume)
            .next_back()
            .map(|t| t.rate)
            .unwrap_or(base)
    }

    /// Opening rate after tier resolution
    pub fn resolved_open_rate(&self, trailing_volume: Option<Decimal>) -> Decimal {
        self.tier_rate(self.open_fee_rate, trailing_volume)
    }

    /// Closing rate after tier resolution
    pub fn resolved_close_rate(&self, trailing_volume: Option<Decimal>) -> Decimal {
        self.tier_rate(self.close_fee_rate, trailing_volume)
    }
}

/// Fee schedule for a venue/category pair
///
/// Rates follow each venue's published taker/fixed-fee tables.
pub fn schedule_for(venue: VenueId, category: AssetCategory) -> FeeSchedule {
    use AssetCategory::*;

    match venue {
        // 4.5 bps taker, volume-tier discounts
        VenueId::Hyperliquid => FeeSchedule::taker(
            dec!(0.00045),
            Some(vec![
                FeeTier { volume_threshold_usd: dec!(0), rate: dec!(0.00045) },
                FeeTier { volume_threshold_usd: dec!(5000000), rate: dec!(0.00040) },
                FeeTier { volume_threshold_usd: dec!(25000000), rate: dec!(0.00035) },
                FeeTier { volume_threshold_usd: dec!(100000000), rate: dec!(0.00030) },
            ]),
        ),
        // Zero fees during the points season
        VenueId::Lighter => FeeSchedule::taker(Decimal::ZERO, None),
        VenueId::Dydx => FeeSchedule::taker(
            dec!(0.0005),
            Some(vec![
                FeeTier { volume_threshold_usd: dec!(0), rate: dec!(0.0005) },
                FeeTier { volume_threshold_usd: dec!(1000000), rate: dec!(0.0004) },
                FeeTier { volume_threshold_usd: dec!(5000000), rate: dec!(0.00035) },
                FeeTier { volume_threshold_usd: dec!(25000000), rate: dec!(0.0003) },
            ]),
        ),
        VenueId::Paradex => FeeSchedule::taker(dec!(0.0003), None),
        // Per-category opening fee, no closing fee, $0.10 oracle fee per
        // trade; spread is charged against the oracle on entry only
        VenueId::Ostium => {
            let open = match category {
                CryptoMajor | CryptoAlt => dec!(0.0010),
                Equities => dec!(0.0005),
                Indices => dec!(0.0005),
                ForexMajor | ForexMinor => dec!(0.0003),
                Gold => dec!(0.0003),
                Silver => dec!(0.0015),
            };
            FeeSchedule::oracle(open, Decimal::ZERO)
                .with_flat_fee(dec!(0.10))
                .entry_only_spread()
        }
        // Fixed-fee perps
        VenueId::Avantis => match category {
            ForexMajor => FeeSchedule::oracle(dec!(0.0003), dec!(0.0003)),
            ForexMinor => FeeSchedule::oracle(dec!(0.0005), dec!(0.0005)),
            Gold => FeeSchedule::oracle(dec!(0.0006), Decimal::ZERO),
            Silver => FeeSchedule::oracle(dec!(0.000635), Decimal::ZERO),
            Indices | Equities => FeeSchedule::oracle(dec!(0.0006), Decimal::ZERO),
            CryptoMajor => FeeSchedule::oracle(dec!(0.0006), dec!(0.0006)),
            CryptoAlt => FeeSchedule::oracle(dec!(0.0008), dec!(0.0008)),
        },
        // Position fee on open and close
        VenueId::Gmx => FeeSchedule::oracle(dec!(0.0006), dec!(0.0006)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rate_without_volume_context() {
        let schedule = FeeSchedule::taker(
            dec!(0.0005),
            Some(vec![
                FeeTier { volume_threshold_usd: dec!(0), rate: dec!(0.0005) },
                FeeTier { volume_threshold_usd: dec!(1000000), rate: dec!(0.0002) },
            ]),
        );
        assert_eq!(schedule.resolved_open_rate(None), dec!(0.0005));
        assert_eq!(schedule.resolved_close_rate(None), dec!(0.0005));
    }

    #[test]
    fn test_highest_qualifying_tier_wins() {
        let schedule = schedule_for(VenueId::Hyperliquid, AssetCategory::CryptoMajor);
        assert_eq!(schedule.resolved_open_rate(Some(dec!(4999999))), dec!(0.00045));
        assert_eq!(schedule.resolved_open_rate(Some(dec!(5000000))), dec!(0.00040));
        assert_eq!(schedule.resolved_open_rate(Some(dec!(30000000))), dec!(0.00035));
        assert_eq!(schedule.resolved_open_rate(Some(dec!(500000000))), dec!(0.00030));
    }

    #[test]
    fn test_untiered_schedule_ignores_volume() {
        let schedule = schedule_for(VenueId::Paradex, AssetCategory::CryptoMajor);
        assert_eq!(schedule.resolved_open_rate(Some(dec!(1000000000))), dec!(0.0003));
    }

    #[test]
    fn test_lighter_is_free() {
        let schedule = schedule_for(VenueId::Lighter, AssetCategory::Equities);
        assert_eq!(schedule.open_fee_rate, Decimal::ZERO);
        assert_eq!(schedule.close_fee_rate, Decimal::ZERO);
        assert!(schedule.is_orderbook_venue);
    }

    #[test]
    fn test_ostium_gold_schedule() {
        let schedule = schedule_for(VenueId::Ostium, AssetCategory::Gold);
        assert_eq!(schedule.open_fee_rate, dec!(0.0003));
        assert_eq!(schedule.close_fee_rate, Decimal::ZERO);
        assert_eq!(schedule.flat_fee_usd, dec!(0.10));
        assert!(schedule.one_sided_spread);
        assert!(!schedule.is_orderbook_venue);
    }

    #[test]
    fn test_avantis_asymmetric_fees() {
        let gold = schedule_for(VenueId::Avantis, AssetCategory::Gold);
        assert_eq!(gold.open_fee_rate, dec!(0.0006));
        assert_eq!(gold.close_fee_rate, Decimal::ZERO);

        let fx = schedule_for(VenueId::Avantis, AssetCategory::ForexMajor);
        assert_eq!(fx.open_fee_rate, fx.close_fee_rate);
    }

    #[test]
    fn test_orderbook_flag_matches_venue_kind() {
        for venue in VenueId::all() {
            let schedule = schedule_for(venue, AssetCategory::CryptoMajor);
            assert_eq!(schedule.is_orderbook_venue, venue.is_orderbook());
        }
    }
}
