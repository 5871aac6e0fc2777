//! perp-cost: execution cost comparison across perpetual futures venues
//!
//! This library provides the core components for:
//! - Per-venue market data adapters (orderbook and oracle-priced venues)
//! - A normalized market snapshot model
//! - Static fee schedules with volume-tier resolution
//! - The cost engine (orderbook walk / oracle spread costing)
//! - The comparison aggregator (concurrent fan-out, ranking)
//! - CLI front-end and observability stack

pub mod assets;
pub mod cli;
pub mod compare;
pub mod config;
pub mod engine;
pub mod fees;
pub mod snapshot;
pub mod telemetry;
pub mod venues;
