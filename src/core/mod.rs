pub mod errors;
pub mod furigana;
pub mod models;
pub mod pipeline;
pub mod tasks;

pub use errors::MochimineError;
pub use models::{
    DeckResult,
    JapaneseWord,
    RemoteCard,
    SelectedImage,
};
