mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::MovieExplorerApp;
use config::AnalysisSettings;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = AnalysisSettings::load_or_default(config::SETTINGS_FILE).unwrap_or_else(|e| {
        log::error!("Ignoring settings file: {e:#}");
        AnalysisSettings::default()
    });
    let source = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.default_source.clone());

    let mut state = AppState::new(settings);
    // A failed load is not fatal here: the window opens on the error screen.
    if let Err(e) = state.load_path(&source) {
        log::error!("Failed to load dataset: {e:#}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movie Explorer – Interactive Movie Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(MovieExplorerApp::new(state)))),
    )
}
