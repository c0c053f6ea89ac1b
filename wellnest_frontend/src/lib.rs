pub mod app;
mod image_loader;
mod theme;

use eframe::{self, egui};

pub use app::WellnestApp;

/// Launches the app in a phone-sized window.
pub fn run_frontend() -> Result<(), eframe::Error> {
    run_frontend_with_options(default_native_options())
}

/// Launches the app with caller-provided options.
pub fn run_frontend_with_options(options: eframe::NativeOptions) -> Result<(), eframe::Error> {
    let _ = env_logger::builder().is_test(false).try_init();
    eframe::run_native(
        "WellNest",
        options,
        Box::new(|cc| Ok(Box::new(WellnestApp::new(cc)))),
    )
}

fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 860.0])
            .with_min_inner_size([360.0, 640.0]),
        ..Default::default()
    }
}
