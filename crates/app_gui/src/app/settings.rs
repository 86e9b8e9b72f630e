//! Server panel: endpoint, config location, health check and versions.

use super::{Panel, UiApp};
use blight_core::ClientConfig;
use blight_core::config::ENDPOINT_ENV;
use eframe::egui;

impl UiApp {
    /// Renders the server screen with the active endpoint and a connectivity check.
    pub(super) fn render_settings_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading("Server");
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Prediction endpoint");
            ui.monospace(self.client.endpoint().as_str());
        });
        ui.add_space(4.0);
        let location = ClientConfig::default_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "unavailable on this platform".to_string());
        ui.label(format!("Config file: {location}"));
        ui.label(format!("Set {ENDPOINT_ENV} to override the endpoint for one run."));

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let label = if self.pinging {
                "Checking..."
            } else {
                "Check server"
            };
            if ui.add_enabled(!self.pinging, egui::Button::new(label)).clicked() {
                self.ping(ctx);
            }
            if ui.button("Back to classifier").clicked() {
                self.panel = Panel::Upload;
            }
        });

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(6.0);
        ui.heading("Versions");
        ui.label(format!("App version: {}", self.app_version));
    }
}
