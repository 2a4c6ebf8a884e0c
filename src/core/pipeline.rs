//! Image -> word-list extraction: OCR pass, agent cleanup pass, JSON pull.

use std::sync::OnceLock;

use regex::Regex;

use super::{
    JapaneseWord,
    MochimineError,
    SelectedImage,
};
use crate::{
    agent::{
        build_prompt,
        AgentHandle,
    },
    ocr,
};

/// Runs the full extraction sequence for one image. Progress messages are
/// human-readable and go straight to the UI log.
///
/// An empty OCR result short-circuits with an empty list before the agent is
/// ever started; OCR and parse failures abort with no partial results.
pub async fn extract_words<F>(
    image: &SelectedImage,
    ocr_token: &str,
    agent: &AgentHandle,
    mut progress: F,
) -> Result<Vec<JapaneseWord>, MochimineError>
where
    F: FnMut(String),
{
    if ocr_token.trim().is_empty() {
        return Err(MochimineError::MissingCredential("OCR token"));
    }

    progress("Running OCR...".to_string());
    let text = ocr::recognize(ocr_token, image).await?;

    if text.trim().is_empty() {
        progress("OCR found no text in the image.".to_string());
        return Ok(Vec::new());
    }
    progress(format!("OCR returned {} characters", text.chars().count()));

    let prompt = build_prompt(&text);
    let raw = agent.run(image, &prompt, &mut progress).await?;

    progress("Parsing word list...".to_string());
    parse_word_list(&raw)
}

fn array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").unwrap())
}

/// Pulls the first `[...]` block out of free-form model output and parses it.
/// No block at all means the model saw no Japanese: an empty list, not an
/// error. A block that is not valid JSON is a hard error.
pub fn parse_word_list(raw: &str) -> Result<Vec<JapaneseWord>, MochimineError> {
    match array_regex().find(raw) {
        Some(m) => Ok(serde_json::from_str(m.as_str())?),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_embedded_in_prose() {
        let raw = r#"Here are the words I found:
[
  {"word": "日本語", "reading": "にほんご", "meaning": "Japanese language", "furigana": "{日}(に){本}(ほん){語}(ご)"}
]
Let me know if you need more."#;

        let words = parse_word_list(raw).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "日本語");
        assert_eq!(words[0].furigana, "{日}(に){本}(ほん){語}(ご)");
    }

    #[test]
    fn missing_array_yields_empty_list() {
        let words = parse_word_list("I could not find any Japanese text.").unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn empty_array_yields_empty_list() {
        let words = parse_word_list("[]").unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn malformed_array_is_a_hard_error() {
        let raw = r#"[{"word": "猫", "reading": "ねこ", "meaning": "cat",}]"#;
        assert!(matches!(parse_word_list(raw), Err(MochimineError::Json(_))));
    }

    #[test]
    fn furigana_defaults_to_empty_when_missing() {
        let raw = r#"[{"word": "ねこ", "reading": "ねこ", "meaning": "cat"}]"#;
        let words = parse_word_list(raw).unwrap();
        assert_eq!(words[0].furigana, "");
    }
}
