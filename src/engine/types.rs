//! Cost engine types

use crate::venues::VenueId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cost computation errors
#[derive(Debug, Error)]
pub enum CostError {
    /// Request was malformed before any costing happened
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The book's resting depth cannot absorb the requested notional
    #[error("insufficient liquidity: requested ${requested}, only ${available} available")]
    InsufficientLiquidity {
        requested: Decimal,
        available: Decimal,
    },
}

/// Unified execution cost for one venue, one asset, one order size
///
/// Immutable once computed. `total_cost_usd` always equals
/// `slippage_usd + spread_cost_usd + open_fee_usd + close_fee_usd`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionCost {
    /// Venue this cost applies to
    pub venue: VenueId,
    /// Logical asset symbol
    pub asset: String,
    /// Requested notional (USD)
    pub order_size_usd: Decimal,
    /// Round-trip slippage as a fraction of notional (0 for oracle venues)
    pub slippage_pct: Decimal,
    /// Slippage in USD terms (slippage_pct * order_size_usd)
    pub slippage_usd: Decimal,
    /// Parametric spread cost in USD (0 for orderbook venues)
    pub spread_cost_usd: Decimal,
    /// Opening fee in USD (includes any flat per-trade fee)
    pub open_fee_usd: Decimal,
    /// Closing fee in USD
    pub close_fee_usd: Decimal,
    /// Total round-trip cost in USD
    pub total_cost_usd: Decimal,
    /// Average entry fill price (oracle price adjusted for spread on
    /// oracle venues)
    pub effective_price: Decimal,
}

impl ExecutionCost {
    /// Total cost expressed in basis points of the order size
    pub fn total_cost_bps(&self) -> Decimal {
        if self.order_size_usd.is_zero() {
            return Decimal::ZERO;
        }
        self.total_cost_usd / self.order_size_usd * Decimal::from(10_000)
    }
}
