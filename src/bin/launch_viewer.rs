use anyhow::{anyhow, Result};
use eframe::egui;
use launch_dash::app::LaunchViewerApp;
use launch_dash::{build_dashboard, DashConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashConfig::default();
    let dashboard = build_dashboard(&config).inspect_err(|e| {
        log::error!("Failed to load launch data: {e:#}");
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchViewerApp::new(dashboard)))),
    )
    .map_err(|e| anyhow!("viewer exited with error: {e}"))
}
