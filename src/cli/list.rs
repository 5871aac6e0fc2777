//! Venue and asset listing commands

use crate::assets;
use crate::fees::schedule_for;
use crate::venues::VenueId;
use rust_decimal::Decimal;

/// Print the supported venues with their cost model and crypto-major rates
pub fn print_venues() {
    println!("{:<13} {:<10} {:>10} {:>11} {:>7} {:>11}", "Venue", "Model", "Open bps", "Close bps", "Tiers", "Flat fee $");
    println!("{:-<67}", "");
    for venue in VenueId::all() {
        let schedule = schedule_for(venue, assets::AssetCategory::CryptoMajor);
        let model = if schedule.is_orderbook_venue { "orderbook" } else { "oracle" };
        println!(
            "{:<13} {:<10} {:>10} {:>11} {:>7} {:>11}",
            venue.name(),
            model,
            format!("{:.2}", schedule.open_fee_rate * Decimal::from(10_000)),
            format!("{:.2}", schedule.close_fee_rate * Decimal::from(10_000)),
            schedule.tiers.as_ref().map_or(0, |t| t.len()),
            format!("{:.2}", schedule.flat_fee_usd),
        );
    }
    println!("(rates shown for the crypto-major category; oracle venues vary by category)");
}

/// Print the asset catalog with per-venue tickers
pub fn print_assets() {
    println!("{:<8} {:<13} {}", "Asset", "Category", "Listed on");
    println!("{:-<70}", "");
    for asset in assets::catalog() {
        let listings: Vec<String> = asset
            .venues()
            .into_iter()
            .map(|v| format!("{}:{}", v.name(), asset.ticker(v).unwrap_or("?")))
            .collect();
        println!(
            "{:<8} {:<13} {}",
            asset.symbol,
            asset.category.to_string(),
            listings.join(" ")
        );
    }
}
