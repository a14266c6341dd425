//! CLI interface for price-tracker
//!
//! Provides subcommands for:
//! - `serve`: Run the ingestion worker and the HTTP API
//! - `latest`: One-shot latest price lookup
//! - `history`: Print the downsampled 24h history from the store
//! - `config`: Show configuration

mod query;
mod serve;

pub use query::{HistoryArgs, LatestArgs};
pub use serve::ServeArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "price-tracker")]
#[command(about = "Live cryptocurrency price tracker with 24h history")]
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
    /// Run the ingestion worker and the HTTP API
    Serve(ServeArgs),
    /// Look up the latest price of a symbol
    Latest(LatestArgs),
    /// Show the downsampled 24h history of a symbol
    History(HistoryArgs),
    /// Show configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_bind() {
        let cli = Cli::parse_from(["price-tracker", "serve", "--bind", "127.0.0.1:9000"]);
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.bind.as_deref(), Some("127.0.0.1:9000")),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_parse_latest_defaults_currency() {
        let cli = Cli::parse_from(["price-tracker", "-c", "alt.toml", "latest", "--symbol", "ETH"]);
        match cli.command {
            Commands::Latest(args) => {
                assert_eq!(args.symbol, "ETH");
                assert!(args.currency.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.config, "alt.toml");
    }

    #[test]
    fn test_history_requires_symbol() {
        assert!(Cli::try_parse_from(["price-tracker", "history"]).is_err());
    }
}
