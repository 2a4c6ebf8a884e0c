use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::theme::Theme;
use crate::core::JapaneseWord;

/// The editable word list. Rows are removable before publishing; everything
/// else about a word is read-only.
pub struct WordTable;

impl WordTable {
    /// Returns the index of the row whose remove button was clicked.
    pub fn show(ui: &mut egui::Ui, words: &[JapaneseWord], theme: &Theme) -> Option<usize> {
        let mut removed = None;

        let text_height =
            egui::TextStyle::Body.resolve(ui.style()).size.max(ui.spacing().interact_size.y);

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder())
            .column(Column::exact(24.0))
            .header(25.0, |mut header| {
                header.col(|ui| {
                    ui.label(theme.heading("Word"));
                });
                header.col(|ui| {
                    ui.label(theme.heading("Reading"));
                });
                header.col(|ui| {
                    ui.label(theme.heading("Meaning"));
                });
                header.col(|_ui| {});
            })
            .body(|mut body| {
                body.rows(text_height, words.len(), |mut row| {
                    let index = row.index();
                    let word = &words[index];

                    row.col(|ui| {
                        ui.strong(theme.bold(&word.word));
                    });
                    row.col(|ui| {
                        ui.label(&word.reading);
                    });
                    row.col(|ui| {
                        ui.label(&word.meaning);
                    });
                    row.col(|ui| {
                        if ui.small_button("✖").on_hover_text("Remove word").clicked() {
                            removed = Some(index);
                        }
                    });
                });
            });

        removed
    }
}
