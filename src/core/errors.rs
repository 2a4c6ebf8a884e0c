use thiserror::Error;

#[derive(Error, Debug)]
pub enum MochimineError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("{0} is not set. Add it in Settings.")]
    MissingCredential(&'static str),

    #[error("OCR service error ({status}): {body}")]
    OcrService { status: u16, body: String },

    #[error("Mochi API error ({status}): {body}")]
    MochiApi { status: u16, body: String },

    #[error("Claude CLI could not be found on this system")]
    AgentUnavailable,

    #[error("Agent run failed: {0}")]
    AgentFailed(String),

    #[error("MochimineError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for MochimineError {
    fn from(error: std::io::Error) -> Self {
        MochimineError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for MochimineError {
    fn from(error: reqwest::Error) -> Self {
        MochimineError::Reqwest(Box::new(error))
    }
}
