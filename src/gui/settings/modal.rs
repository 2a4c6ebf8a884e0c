use eframe::egui;

use super::SettingsData;

/// Credential editor. Edits a scratch copy; the app persists on save.
pub struct SettingsModal {
    open: bool,
    draft: SettingsData,
    saved: Option<SettingsData>,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, draft: SettingsData::default(), saved: None }
    }

    pub fn open_settings(&mut self, current: SettingsData) {
        self.draft = current;
        self.open = true;
    }

    /// The settings confirmed this frame, if the user hit Save.
    pub fn take_saved(&mut self) -> Option<SettingsData> {
        self.saved.take()
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let mut close = false;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("API Keys");
            ui.add_space(10.0);

            egui::Grid::new("settings_grid").num_columns(2).spacing([10.0, 8.0]).show(ui, |ui| {
                ui.label("Mochi API key");
                ui.add(
                    egui::TextEdit::singleline(&mut self.draft.mochi_api_key)
                        .password(true)
                        .desired_width(260.0),
                );
                ui.end_row();

                ui.label("OCR token");
                ui.add(
                    egui::TextEdit::singleline(&mut self.draft.ocr_token)
                        .password(true)
                        .desired_width(260.0),
                );
                ui.end_row();
            });

            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(
                    "The Mochi key is used as the Basic-auth username; the OCR token \
                     authorizes the text-recognition service.",
                )
                .size(11.0)
                .weak(),
            );

            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Save").clicked() {
                    self.saved = Some(SettingsData {
                        mochi_api_key: self.draft.mochi_api_key.trim().to_string(),
                        ocr_token: self.draft.ocr_token.trim().to_string(),
                    });
                    close = true;
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });

        if close || modal.should_close() {
            self.open = false;
        }
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
