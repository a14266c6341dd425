use anyhow::Context;
use clap::Parser;
use price_tracker::cli::{Cli, Commands};
use price_tracker::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            let mut config: Config = toml::from_str(include_str!("../config.toml.example"))
                .context("Invalid bundled default config")?;
            config.apply_env_overrides()?;
            config
        }
    };

    // Initialize telemetry
    price_tracker::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting price tracker");
            args.execute(config).await?;
        }
        Commands::Latest(args) => {
            args.execute(config).await?;
        }
        Commands::History(args) => {
            args.execute(config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Feed: {}", config.feed.ws_url);
            println!("  REST: {}", config.feed.rest_base_url);
            println!(
                "  Interval: {}s, reconnect delay: {}s",
                config.feed.fetch_interval_secs, config.feed.reconnect_delay_secs
            );
            println!("  Store: {:?} {}", config.store.backend, config.store.url);
            println!("  API: {}", config.api.bind_addr);
        }
    }

    Ok(())
}
