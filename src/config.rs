//! Configuration types for perp-cost

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub comparison: ComparisonConfig,
    pub telemetry: TelemetryConfig,
}

/// Comparison behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonConfig {
    /// Maximum snapshot age before a venue's data is treated as a failure
    #[serde(default = "default_freshness_window_secs")]
    pub freshness_window_secs: u64,

    /// Maximum wait per venue fetch
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Order sizes used when the CLI is not given explicit ones (USD)
    #[serde(default = "default_order_sizes")]
    pub default_order_sizes: Vec<Decimal>,
}

fn default_freshness_window_secs() -> u64 {
    30
}
fn default_fetch_timeout_secs() -> u64 {
    10
}
fn default_order_sizes() -> Vec<Decimal> {
    vec![
        Decimal::from(10_000),
        Decimal::from(100_000),
        Decimal::from(1_000_000),
        Decimal::from(10_000_000),
    ]
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            freshness_window_secs: default_freshness_window_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            default_order_sizes: default_order_sizes(),
        }
    }
}

impl ComparisonConfig {
    /// Freshness window as a `Duration`
    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_window_secs)
    }

    /// Per-venue fetch timeout as a `Duration`
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Prometheus exporter port; 0 disables the exporter
    #[serde(default)]
    pub metrics_port: u16,
    /// Default log level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: 0,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [comparison]
            freshness_window_secs = 15
            fetch_timeout_secs = 5
            default_order_sizes = [10000, 100000]

            [telemetry]
            metrics_port = 9090
            log_level = "debug"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.comparison.freshness_window_secs, 15);
        assert_eq!(config.comparison.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.comparison.default_order_sizes, vec![dec!(10000), dec!(100000)]);
        assert_eq!(config.telemetry.metrics_port, 9090);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_config_defaults_fill_in() {
        let toml = r#"
            [comparison]
            [telemetry]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.comparison.freshness_window_secs, 30);
        assert_eq!(config.comparison.fetch_timeout_secs, 10);
        assert_eq!(config.comparison.default_order_sizes.len(), 4);
        assert_eq!(config.telemetry.metrics_port, 0);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[comparison]\nfetch_timeout_secs = 3\n\n[telemetry]\nlog_level = \"warn\"\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.comparison.fetch_timeout_secs, 3);
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.toml.example")).unwrap();
        assert!(config.comparison.fetch_timeout_secs > 0);
    }
}
