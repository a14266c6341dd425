//! One-shot query commands

use crate::app::App;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct LatestArgs {
    /// Base asset, e.g. BTC
    #[arg(short, long)]
    pub symbol: String,

    /// Quote currency (defaults to the configured one)
    #[arg(long)]
    pub currency: Option<String>,
}

impl LatestArgs {
    /// Cache is empty here, so this goes to the point fetch and then the store
    pub async fn execute(&self, config: Config) -> anyhow::Result<()> {
        let currency = self
            .currency
            .clone()
            .unwrap_or_else(|| config.feed.quote_currency.clone());
        let app = App::build(config).await?;

        let sample = app.lookup().get_latest_price(&self.symbol, &currency).await?;
        println!("{}", serde_json::to_string_pretty(&sample)?);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Base asset, e.g. BTC
    #[arg(short, long)]
    pub symbol: String,
}

impl HistoryArgs {
    pub async fn execute(&self, config: Config) -> anyhow::Result<()> {
        let currency = config.feed.quote_currency.clone();
        let app = App::build(config).await?;

        let history = app
            .lookup()
            .get_price_history_24h(&self.symbol, &currency)
            .await?;
        if history.is_empty() {
            println!("No samples for {} in the last 24h", self.symbol);
        }
        for sample in history {
            println!(
                "{}  {} {} {}",
                sample.timestamp.to_rfc3339(),
                sample.symbol,
                sample.price,
                sample.currency
            );
        }
        Ok(())
    }
}
