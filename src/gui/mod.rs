pub mod app;
pub mod colors;
pub mod dialogs;

use crate::AppConfig;

/// Entry point: launch the native panel window
pub fn run(config: AppConfig) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Flotilla — Gestión de flota de buses")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flotilla",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::FlotillaApp::new(cc, config)))),
    )
    .map_err(|e| crate::FlotillaError::GuiError(format!("{}", e)))
}
