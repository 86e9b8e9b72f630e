//! Drop zone, predict button and result rendering.

use super::UiApp;
use blight_core::{DroppedFile, IMAGE_EXTENSIONS, WidgetState};
use eframe::egui;
use rfd::FileDialog;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(220, 252, 231);
const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(22, 101, 52);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

impl UiApp {
    pub(super) fn render_upload_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.heading(&self.config.window_title);
        });
        ui.add_space(16.0);

        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let (stroke, fill) = if hovering {
            (ACCENT, egui::Color32::from_rgb(239, 246, 255))
        } else {
            (egui::Color32::GRAY, ui.visuals().faint_bg_color)
        };
        let zone = egui::Frame::new()
            .stroke(egui::Stroke::new(2.0, stroke))
            .fill(fill)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(24))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("⬆").size(40.0).color(ACCENT));
                    if hovering {
                        ui.colored_label(ACCENT, "Drop the image here...");
                    } else {
                        ui.label("Drag & drop an image here, or click to select one");
                    }
                });
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);

        if zone.clicked()
            && let Some(path) = FileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
        {
            self.accept(vec![DroppedFile::Path(path)]);
        }

        if let Some(file) = self.widget.file() {
            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                ui.colored_label(SUCCESS_TEXT, format!("Selected file: {}", file.name()));
            });
        }

        ui.add_space(16.0);
        let label = if self.widget.is_busy() {
            "Processing..."
        } else {
            "Predict"
        };
        let button = egui::Button::new(egui::RichText::new(label).strong())
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add_enabled(self.widget.can_submit(), button).clicked() {
            self.submit(ctx);
        }

        if self.widget.state() == WidgetState::Submitting {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.spinner();
            });
        }

        if let Some(result) = self.widget.result() {
            ui.add_space(24.0);
            egui::Frame::group(ui.style())
                .fill(SUCCESS_FILL)
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("Prediction Result")
                                .strong()
                                .size(18.0)
                                .color(SUCCESS_TEXT),
                        );
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new("Class:").color(SUCCESS_TEXT));
                            ui.label(
                                egui::RichText::new(&result.label)
                                    .strong()
                                    .color(SUCCESS_TEXT),
                            );
                        });
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new("Confidence:").color(SUCCESS_TEXT));
                            ui.label(
                                egui::RichText::new(result.confidence_percent())
                                    .strong()
                                    .color(SUCCESS_TEXT),
                            );
                        });
                    });
                });
        }

        if let Some(error) = self.widget.error() {
            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                ui.colored_label(ERROR_TEXT, error.message());
            });
        }
    }
}
