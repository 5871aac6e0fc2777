//! Orderbook walk
//!
//! Consumes depth level by level until the requested notional is filled,
//! producing the notional-weighted average fill price and the deviation
//! from mid. Used for both directions: a buy walks the asks, a sell walks
//! the bids.

use super::types::CostError;
use crate::snapshot::PriceLevel;
use rust_decimal::Decimal;

/// Result of filling one direction against the book
#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkFill {
    /// Notional-weighted average fill price
    pub effective_price: Decimal,
    /// |effective - mid| / mid
    pub slippage_pct: Decimal,
}

/// Fill `order_size_usd` of notional against `levels`, best price first.
///
/// `levels` must already be ordered best-to-worst for the direction being
/// walked (ascending asks for a buy, descending bids for a sell).
pub(crate) fn walk_side(
    levels: &[PriceLevel],
    order_size_usd: Decimal,
    mid_price: Decimal,
) -> Result<WalkFill, CostError> {
    if mid_price <= Decimal::ZERO {
        return Err(CostError::InvalidInput(
            "orderbook snapshot has no reference price".to_string(),
        ));
    }

    let mut remaining_usd = order_size_usd;
    let mut total_units = Decimal::ZERO;
    let mut total_notional = Decimal::ZERO;

    for level in levels {
        if remaining_usd <= Decimal::ZERO {
            break;
        }

        let take_usd = remaining_usd.min(level.notional());
        total_units += take_usd / level.price;
        total_notional += take_usd;
        remaining_usd -= take_usd;
    }

    if remaining_usd > Decimal::ZERO {
        return Err(CostError::InsufficientLiquidity {
            requested: order_size_usd,
            available: total_notional,
        });
    }

    let effective_price = total_notional / total_units;
    let slippage_pct = (effective_price - mid_price).abs() / mid_price;

    Ok(WalkFill {
        effective_price,
        slippage_pct,
    })
}
