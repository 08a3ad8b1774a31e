#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::FieldViewApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("FieldView"),
        ..Default::default()
    };

    eframe::run_native(
        "FieldView",
        options,
        Box::new(|cc| Ok(Box::new(FieldViewApp::new(cc)))),
    )
}
