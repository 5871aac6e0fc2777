use clap::Parser;
use perp_cost::cli::{self, Cli, Commands};
use perp_cost::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, falling back to the bundled example defaults
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = perp_cost::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Compare(args) => {
            tracing::info!(asset = %args.asset, "Starting comparison");
            args.execute(&config).await?;
        }
        Commands::Venues => {
            cli::print_venues();
        }
        Commands::Assets => {
            cli::print_assets();
        }
    }

    Ok(())
}
