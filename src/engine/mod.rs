//! Cost engine
//!
//! Turns a normalized market snapshot plus a fee schedule into a unified
//! `ExecutionCost`. Orderbook venues are costed by walking depth in both
//! directions and averaging (round-trip proxy); oracle venues are costed
//! analytically from their spread parameters. The two algorithms share
//! nothing but the output shape, so dispatch is an exhaustive match on the
//! snapshot variant.

mod oracle;
mod types;
mod walk;

pub use types::{CostError, ExecutionCost};

use crate::fees::FeeSchedule;
use crate::snapshot::MarketSnapshot;
use crate::venues::VenueId;
use rust_decimal::Decimal;

/// Stateless execution cost calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct CostEngine;

impl CostEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the round-trip execution cost of `order_size_usd` notional.
    ///
    /// `trailing_volume` is the caller's 30-day volume on the venue, used
    /// for fee-tier resolution when the schedule has tiers.
    pub fn compute(
        &self,
        venue: VenueId,
        asset: &str,
        snapshot: &MarketSnapshot,
        schedule: &FeeSchedule,
        order_size_usd: Decimal,
        trailing_volume: Option<Decimal>,
    ) -> Result<ExecutionCost, CostError> {
        if order_size_usd <= Decimal::ZERO {
            return Err(CostError::InvalidInput(format!(
                "order size must be positive, got {order_size_usd}"
            )));
        }
        if schedule.is_orderbook_venue != snapshot.is_orderbook() {
            return Err(CostError::InvalidInput(format!(
                "fee schedule and snapshot disagree on venue kind for {venue}"
            )));
        }

        let open_fee_usd =
            order_size_usd * schedule.resolved_open_rate(trailing_volume) + schedule.flat_fee_usd;
        let close_fee_usd = order_size_usd * schedule.resolved_close_rate(trailing_volume);

        let (slippage_pct, spread_cost_usd, effective_price) = match snapshot {
            MarketSnapshot::Orderbook(book) => {
                // Cost both directions and average them: a comparison is
                // meant to represent open + close, not a single fill.
                let buy = walk::walk_side(&book.asks, order_size_usd, book.mid_price)?;
                let sell = walk::walk_side(&book.bids, order_size_usd, book.mid_price)?;
                let avg_slippage = (buy.slippage_pct + sell.slippage_pct) / Decimal::TWO;
                (avg_slippage, Decimal::ZERO, buy.effective_price)
            }
            MarketSnapshot::Oracle(feed) => {
                let spread =
                    oracle::spread_cost_usd(feed, order_size_usd, schedule.one_sided_spread);
                (Decimal::ZERO, spread, oracle::effective_price(feed))
            }
        };

        let slippage_usd = slippage_pct * order_size_usd;
        let total_cost_usd = slippage_usd + spread_cost_usd + open_fee_usd + close_fee_usd;

        Ok(ExecutionCost {
            venue,
            asset: asset.to_string(),
            order_size_usd,
            slippage_pct,
            slippage_usd,
            spread_cost_usd,
            open_fee_usd,
            close_fee_usd,
            total_cost_usd,
            effective_price,
        })
    }
}
