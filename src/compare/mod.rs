//! Comparison aggregator
//!
//! Fans one fetch → staleness check → cost pipeline out per requested
//! venue, concurrently, and collects the results into a single ranked
//! comparison. A venue failing (fetch error, timeout, stale data, thin
//! book, unlisted asset) becomes an entry in the failure list and never
//! aborts its siblings; only a malformed request fails the comparison
//! itself.

use crate::assets::{self, Asset};
use crate::config::ComparisonConfig;
use crate::engine::{CostEngine, ExecutionCost};
use crate::telemetry::{record_latency, record_venue_failure, LatencyMetric};
use crate::venues::{FetchError, VenueAdapter, VenueId};
use chrono::Utc;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// Errors that fail the whole comparison request
///
/// Everything venue-scoped is downgraded to a [`VenueFailure`] instead.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("unknown asset: {0}")]
    UnknownAsset(String),
    #[error("no adapter registered for venue: {0}")]
    UnknownVenue(VenueId),
    #[error("order size must be positive, got {0}")]
    InvalidOrderSize(Decimal),
}

/// Snapshot was fetched but is too old to trust
#[derive(Debug, Error)]
#[error("stale snapshot: {age_secs}s old exceeds freshness window of {window_secs}s")]
pub struct StaleDataError {
    pub age_secs: i64,
    pub window_secs: u64,
}

/// One venue that could not be costed, with the reason
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueFailure {
    pub venue: VenueId,
    pub reason: String,
}

/// Ranked comparison for one asset and order size
///
/// Built once per request and returned to the caller; never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Request identifier (correlates log lines)
    pub id: Uuid,
    /// Logical asset symbol
    pub asset: String,
    /// Requested notional (USD)
    pub order_size_usd: Decimal,
    /// Successful venue costs, ascending by total cost
    pub ranked: Vec<ExecutionCost>,
    /// Venues that failed, with reasons
    pub failures: Vec<VenueFailure>,
}

impl ComparisonResult {
    /// Cheapest venue, if any succeeded
    pub fn cheapest(&self) -> Option<&ExecutionCost> {
        self.ranked.first()
    }
}

/// Fans out cost computations across venues and ranks the results
pub struct ComparisonAggregator {
    adapters: HashMap<VenueId, Arc<dyn VenueAdapter>>,
    engine: CostEngine,
    freshness_window: Duration,
    fetch_timeout: Duration,
}

impl ComparisonAggregator {
    pub fn new(adapters: Vec<Arc<dyn VenueAdapter>>, config: &ComparisonConfig) -> Self {
        Self {
            adapters: adapters.into_iter().map(|a| (a.id(), a)).collect(),
            engine: CostEngine::new(),
            freshness_window: config.freshness_window(),
            fetch_timeout: config.fetch_timeout(),
        }
    }

    /// Compare execution cost for `asset_symbol` at `order_size_usd` across
    /// `venues` (all registered venues when empty).
    ///
    /// Request validation happens before any fetch; a bad asset, venue, or
    /// size is fatal. After that, per-venue problems only populate the
    /// failure list — zero successes still returns a well-formed result.
    pub async fn compare(
        &self,
        asset_symbol: &str,
        order_size_usd: Decimal,
        venues: &[VenueId],
        trailing_volume: Option<Decimal>,
    ) -> Result<ComparisonResult, CompareError> {
        let asset = assets::find(asset_symbol)
            .ok_or_else(|| CompareError::UnknownAsset(asset_symbol.to_string()))?;
        if order_size_usd <= Decimal::ZERO {
            return Err(CompareError::InvalidOrderSize(order_size_usd));
        }

        let mut requested: Vec<VenueId> = if venues.is_empty() {
            self.adapters.keys().copied().collect()
        } else {
            venues.to_vec()
        };
        requested.sort();
        requested.dedup();
        for venue in &requested {
            if !self.adapters.contains_key(venue) {
                return Err(CompareError::UnknownVenue(*venue));
            }
        }

        let id = Uuid::new_v4();
        tracing::info!(
            request = %id,
            asset = asset.symbol,
            size = %order_size_usd,
            venues = requested.len(),
            "Running comparison"
        );
        let started = Instant::now();

        let tasks = requested.iter().map(|venue| {
            let venue = *venue;
            let adapter = Arc::clone(&self.adapters[&venue]);
            let engine = self.engine;
            let freshness_window = self.freshness_window;
            let fetch_timeout = self.fetch_timeout;
            tokio::spawn(async move {
                let outcome = venue_pipeline(
                    venue,
                    adapter,
                    engine,
                    asset,
                    order_size_usd,
                    trailing_volume,
                    freshness_window,
                    fetch_timeout,
                )
                .await;
                (venue, outcome)
            })
        });

        let mut ranked = Vec::new();
        let mut failures = Vec::new();
        for joined in join_all(tasks).await {
            match joined {
                Ok((_, Ok(cost))) => ranked.push(cost),
                Ok((venue, Err(reason))) => {
                    tracing::warn!(request = %id, %venue, %reason, "Venue dropped from comparison");
                    record_venue_failure(venue);
                    failures.push(VenueFailure { venue, reason });
                }
                Err(join_err) => {
                    tracing::error!(request = %id, error = %join_err, "Venue task panicked");
                }
            }
        }

        // Deterministic regardless of fetch completion order
        ranked.sort_by(|a, b| {
            a.total_cost_usd
                .cmp(&b.total_cost_usd)
                .then_with(|| a.venue.name().cmp(b.venue.name()))
        });
        failures.sort_by(|a, b| a.venue.name().cmp(b.venue.name()));

        record_latency(LatencyMetric::Comparison, started.elapsed());
        tracing::info!(
            request = %id,
            succeeded = ranked.len(),
            failed = failures.len(),
            "Comparison complete"
        );

        Ok(ComparisonResult {
            id,
            asset: asset.symbol.to_string(),
            order_size_usd,
            ranked,
            failures,
        })
    }
}

/// One venue's fetch → staleness check → compute pipeline.
///
/// Every failure mode collapses into a reason string; the aggregator treats
/// them uniformly.
#[allow(clippy::too_many_arguments)]
async fn venue_pipeline(
    venue: VenueId,
    adapter: Arc<dyn VenueAdapter>,
    engine: CostEngine,
    asset: &'static Asset,
    order_size_usd: Decimal,
    trailing_volume: Option<Decimal>,
    freshness_window: Duration,
    fetch_timeout: Duration,
) -> Result<ExecutionCost, String> {
    let Some(ticker) = asset.ticker(venue) else {
        return Err(format!("{} is not listed on {venue}", asset.symbol));
    };

    let started = Instant::now();
    let snapshot = match tokio::time::timeout(fetch_timeout, adapter.fetch(ticker)).await {
        Ok(Ok(snapshot)) => snapshot,
        Ok(Err(err)) => return Err(err.to_string()),
        Err(_) => return Err(FetchError::Timeout(fetch_timeout).to_string()),
    };
    record_latency(LatencyMetric::VenueFetch, started.elapsed());

    let age = Utc::now() - snapshot.timestamp();
    if age.num_seconds() > freshness_window.as_secs() as i64 {
        return Err(StaleDataError {
            age_secs: age.num_seconds(),
            window_secs: freshness_window.as_secs(),
        }
        .to_string());
    }

    let schedule = crate::fees::schedule_for(venue, asset.category);
    engine
        .compute(
            venue,
            asset.symbol,
            &snapshot,
            &schedule,
            order_size_usd,
            trailing_volume,
        )
        .map_err(|e| e.to_string())
}
