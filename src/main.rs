//! Сленглит GUI - переводчик сленга

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use app::App;
use eframe::egui;
use slanglit::config::Settings;
use slanglit::identity::bridge_id_from_env;
use slanglit::logging;

fn main() -> eframe::Result<()> {
    let (settings, config_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    logging::init_file_logging(&settings.data_dir());
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "failed to load config, using defaults");
    }
    tracing::info!(mode = ?settings.mode, api = %settings.api_base_url, "Slanglit starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    let bridge_id = bridge_id_from_env();
    eframe::run_native(
        "Сленглит - переводчик сленга",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(settings, bridge_id)?))),
    )
}
