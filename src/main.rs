#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use fiber_timeline::app::TimelineApp;
use fiber_timeline::config::{AppDirs, SettingsStore};
use fiber_timeline::logging::init_logging;

fn main() -> eframe::Result<()> {
    let dirs = AppDirs::discover();
    let store = SettingsStore::new(dirs.settings_path());
    let settings = store.load_or_default();

    // Keep the handle alive until exit so buffered records get flushed.
    let _logger = match init_logging(&settings.log_level, &dirs.log_dir) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Fiber Timeline"),
        ..Default::default()
    };

    let log_dir = dirs.log_dir.clone();
    eframe::run_native(
        "Fiber Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(TimelineApp::new(cc, settings, store, log_dir)))),
    )
}
