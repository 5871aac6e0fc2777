//! Compare command implementation

use crate::compare::{ComparisonAggregator, ComparisonResult};
use crate::config::Config;
use crate::venues::{self, VenueId};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Logical asset symbol (e.g. BTC, GOLD, EURUSD)
    #[arg(short, long)]
    pub asset: String,

    /// Order sizes in USD; defaults to the configured ladder
    #[arg(short, long, value_delimiter = ',')]
    pub sizes: Vec<Decimal>,

    /// Venues to include; defaults to all seven
    #[arg(short, long, value_delimiter = ',')]
    pub venues: Vec<VenueId>,

    /// 30-day trailing volume on each venue, for fee-tier resolution (USD)
    #[arg(long)]
    pub trailing_volume: Option<Decimal>,

    /// Emit results as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

impl CompareArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let aggregator =
            ComparisonAggregator::new(venues::default_adapters(), &config.comparison);

        let sizes = if self.sizes.is_empty() {
            config.comparison.default_order_sizes.clone()
        } else {
            self.sizes.clone()
        };

        let mut results = Vec::with_capacity(sizes.len());
        for size in sizes {
            let result = aggregator
                .compare(&self.asset, size, &self.venues, self.trailing_volume)
                .await?;
            results.push(result);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            for result in &results {
                print_table(result);
            }
        }

        Ok(())
    }
}

fn print_table(result: &ComparisonResult) {
    println!();
    println!(
        "{} @ ${} notional",
        result.asset,
        format_usd(result.order_size_usd)
    );
    println!("{:-<98}", "");
    println!(
        "{:<13} {:>14} {:>10} {:>11} {:>11} {:>11} {:>12} {:>10}",
        "Venue", "Eff. Price", "Slip %", "Spread $", "Open $", "Close $", "Total $", "Total bps"
    );
    println!("{:-<98}", "");

    for cost in &result.ranked {
        println!(
            "{:<13} {:>14} {:>10} {:>11} {:>11} {:>11} {:>12} {:>10}",
            cost.venue.name(),
            format!("{:.4}", cost.effective_price),
            format!("{:.4}", cost.slippage_pct * Decimal::from(100)),
            format!("{:.2}", cost.spread_cost_usd),
            format!("{:.2}", cost.open_fee_usd),
            format!("{:.2}", cost.close_fee_usd),
            format!("{:.2}", cost.total_cost_usd),
            format!("{:.2}", cost.total_cost_bps()),
        );
    }
    if result.ranked.is_empty() {
        println!("(no venue produced a cost)");
    }

    if let Some(cheapest) = result.cheapest() {
        println!(
            "cheapest: {} at ${:.2} ({:.2} bps)",
            cheapest.venue.name(),
            cheapest.total_cost_usd,
            cheapest.total_cost_bps()
        );
    }

    for failure in &result.failures {
        println!("  ! {}: {}", failure.venue.name(), failure.reason);
    }
}

fn format_usd(value: Decimal) -> String {
    // Thousands separators for whole-dollar amounts
    let whole = value.trunc().to_string();
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    let digits: Vec<char> = whole.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 && *c != '-' {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(10000)), "10,000");
        assert_eq!(format_usd(dec!(1000000)), "1,000,000");
        assert_eq!(format_usd(dec!(999)), "999");
        assert_eq!(format_usd(dec!(1000.75)), "1,000");
    }
}
