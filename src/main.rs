use std::sync::Arc;

use anyhow::Result;
use launch_dash::{build_dashboard, server, DashConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashConfig::default();
    let dashboard = match build_dashboard(&config) {
        Ok(d) => Arc::new(d),
        Err(e) => {
            log::error!("Failed to start dashboard: {e:#}");
            return Err(e);
        }
    };

    server::serve(dashboard, config.bind_addr).await
}
