use std::{
    fs,
    path::Path,
};

use base64::{
    engine::general_purpose::STANDARD,
    Engine,
};

use super::MochimineError;

/// An image the user picked for extraction. Bytes live in memory only;
/// nothing is cached to disk beyond the original file.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub name: String,
    pub path: String,
    pub base64: String,
    pub media_type: String,
}

impl SelectedImage {
    pub fn from_path(path: &Path) -> Result<Self, MochimineError> {
        let bytes = fs::read(path)?;

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("Unknown File")
            .to_string();

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        let media_type = match ext.as_str() {
            "jpg" => "image/jpeg".to_string(),
            "pdf" => "application/pdf".to_string(),
            other => format!("image/{}", other),
        };

        Ok(Self {
            name,
            path: path.display().to_string(),
            base64: STANDARD.encode(&bytes),
            media_type,
        })
    }
}

/// One extracted vocabulary entry, as returned by the model.
/// `furigana` holds the per-kanji annotated form, e.g. `{漢}(かん){字}(じ)`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct JapaneseWord {
    pub word: String,
    pub reading: String,
    pub meaning: String,
    #[serde(default)]
    pub furigana: String,
}

/// Summary returned by the deck-publishing workflow.
#[derive(Debug, Clone)]
pub struct DeckResult {
    pub deck_id: String,
    pub deck_name: String,
    pub cards_created: usize,
    pub total_words: usize,
}

/// A card fetched back from Mochi, reverse-parsed from its stored content.
#[derive(Debug, Clone)]
pub struct RemoteCard {
    pub front: String,
    pub reading: String,
    pub kanji: String,
    pub meaning: String,
}
