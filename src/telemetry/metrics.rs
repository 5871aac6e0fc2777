//! Prometheus metrics

use crate::venues::VenueId;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// One venue fetch + translate
    VenueFetch,
    /// Full comparison fan-out, all venues included
    Comparison,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let name = match metric {
        LatencyMetric::VenueFetch => "perpcost_venue_fetch_latency_ms",
        LatencyMetric::Comparison => "perpcost_comparison_latency_ms",
    };
    metrics::histogram!(name).record(duration.as_millis() as f64);
}

/// Count a per-venue failure, labeled by venue
pub fn record_venue_failure(venue: VenueId) {
    metrics::counter!("perpcost_venue_failures_total", "venue" => venue.name()).increment(1);
}
