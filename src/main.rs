use anyhow::Context;
use bank_dashboard::app::DashboardApp;
use bank_dashboard::{load_dataset, AppState, DashboardConfig};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let dataset = load_dataset(&config)
        .with_context(|| format!("loading {}", config.data_path.display()))
        .inspect_err(|e| log::error!("cannot start: {e:#}"))?;

    log::info!(
        "Loaded {} rows with columns {:?}; ages {}..={}, {} job categories",
        dataset.len(),
        dataset.columns,
        dataset.age_span.0,
        dataset.age_span.1,
        dataset.job_categories.len()
    );
    let unusable = dataset.unusable_rows();
    if unusable > 0 {
        log::warn!("{unusable} rows have no usable age or job and will never match a filter");
    }

    let title = config.title.clone();
    let state = AppState::new(config, dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
