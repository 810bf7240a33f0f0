#![warn(clippy::all, rust_2018_idioms)]

use autosketch::{AppConfig, SketchApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}; falling back to defaults", err);
            AppConfig::default()
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };
    eframe::run_native(
        "autosketch",
        native_options,
        Box::new(move |cc| Ok(Box::new(SketchApp::new(cc, config)))),
    )
}
