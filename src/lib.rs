//! Launch records dashboard.
//!
//! The dataset is loaded once into an immutable [`dashboard::DashContext`];
//! two recomputations turn the current view (site selection + payload
//! interval) into chart specifications. Two adapters render them: a local
//! web server ([`server`]) and a native egui window ([`app`]).

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod server;
pub mod state;
pub mod ui;

pub use chart::Figure;
pub use config::DashConfig;
pub use dashboard::{DashContext, Dashboard, RawViewState};
pub use error::DashError;

use anyhow::Result;

/// Load the configured dataset and register the standard callbacks.
pub fn build_dashboard(config: &DashConfig) -> Result<Dashboard> {
    let dataset = data::loader::load_file(&config.data_path)?;
    log::info!("Payload interval bounds are {}", config.boundary.as_str());
    Ok(Dashboard::standard(DashContext::new(dataset, config.boundary)))
}
