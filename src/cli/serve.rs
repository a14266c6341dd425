//! Serve command implementation

use crate::api;
use crate::app::App;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the API bind address
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    pub async fn execute(&self, mut config: Config) -> anyhow::Result<()> {
        if let Some(bind) = &self.bind {
            config.api.bind_addr = bind.clone();
        }
        let bind_addr = config.api.bind_addr.clone();

        let app = App::build(config).await?;
        let worker = app.start_worker();

        api::serve(&bind_addr, app.api_state(), async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            }
            tracing::info!("Shutdown requested");
        })
        .await?;

        worker.shutdown();
        worker.join().await;
        Ok(())
    }
}
