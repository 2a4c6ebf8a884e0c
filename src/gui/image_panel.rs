use eframe::egui;
use rfd::FileDialog;

use super::theme::Theme;
use crate::core::SelectedImage;

pub enum ImageAction {
    Selected(SelectedImage),
    SelectFailed(String),
    Cleared,
    ParseRequested,
}

/// Left-hand panel: pick an image, inspect it, kick off extraction.
pub struct ImagePanel;

impl ImagePanel {
    pub fn show(
        ui: &mut egui::Ui,
        image: Option<&SelectedImage>,
        parsing: bool,
        agent_available: bool,
        theme: &Theme,
    ) -> Option<ImageAction> {
        let mut action = None;

        ui.heading(theme.heading("Image"));
        ui.add_space(6.0);

        match image {
            None => {
                ui.label("No image selected.");
                ui.add_space(6.0);

                if ui.button("Select Image…").clicked() {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Images", &["jpg", "jpeg", "png", "gif", "webp"])
                        .add_filter("Documents", &["pdf"])
                        .pick_file()
                    {
                        action = Some(match SelectedImage::from_path(&path) {
                            Ok(image) => ImageAction::Selected(image),
                            Err(e) => ImageAction::SelectFailed(e.to_string()),
                        });
                    }
                }
            }
            Some(image) => {
                ui.label(theme.bold(&image.name));
                ui.label(
                    egui::RichText::new(&image.media_type).size(11.0).color(theme.comment()),
                );
                ui.label(
                    egui::RichText::new(&image.path).size(11.0).color(theme.comment()),
                );

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let parse_button = ui.add_enabled(
                        !parsing && agent_available,
                        egui::Button::new(if parsing { "Parsing…" } else { "Parse" }),
                    );
                    if parse_button.clicked() {
                        action = Some(ImageAction::ParseRequested);
                    }

                    if ui.add_enabled(!parsing, egui::Button::new("Clear")).clicked() {
                        action = Some(ImageAction::Cleared);
                    }
                });

                if !agent_available {
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new("Claude CLI not found — parsing disabled.")
                            .size(11.0)
                            .color(theme.red()),
                    );
                }
            }
        }

        action
    }
}
