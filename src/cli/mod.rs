//! CLI interface for perp-cost
//!
//! Provides subcommands for:
//! - `compare`: run a cost comparison for one asset across venues
//! - `venues`: list supported venues and their fee model
//! - `assets`: list the asset catalog and per-venue tickers

mod compare;
mod list;

pub use compare::CompareArgs;
pub use list::{print_assets, print_venues};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "perp-cost")]
#[command(about = "Execution cost comparison across perpetual futures venues")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare execution cost for an asset across venues
    Compare(CompareArgs),
    /// List supported venues
    Venues,
    /// List the asset catalog
    Assets,
}
