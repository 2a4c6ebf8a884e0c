/// The two persisted credentials. Loaded once at startup, written back
/// whenever the settings modal saves.
#[derive(Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SettingsData {
    pub mochi_api_key: String,
    pub ocr_token: String,
}
