//! Mochi's furigana annotation syntax: each kanji run carries its reading as
//! `{漢}(かん)`, kana outside annotations passes through unchanged.

use std::sync::OnceLock;

use regex::Regex;
use wana_kana::IsJapaneseChar;

fn annotation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^}]+)\}\(([^)]+)\)").expect("annotation regex"))
}

/// Structured view of an annotated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedText {
    /// Plain display text with annotations stripped.
    pub display: String,
    /// Full phonetic reading (annotation readings plus pass-through kana).
    pub reading: String,
    /// The annotated characters only.
    pub kanji: String,
}

/// Forward transform: build the annotated form from (text, reading) parts.
/// Parts without a reading pass through unannotated.
pub fn annotate(parts: &[(&str, Option<&str>)]) -> String {
    let mut out = String::new();
    for (text, reading) in parts {
        match reading {
            Some(reading) => {
                out.push('{');
                out.push_str(text);
                out.push_str("}(");
                out.push_str(reading);
                out.push(')');
            }
            None => out.push_str(text),
        }
    }
    out
}

/// Inverse transform: recover display text, reading and kanji-only text.
/// `{漢}(かん){字}(じ)` -> display `漢字`, reading `かんじ`, kanji `漢字`.
pub fn parse_annotated(text: &str) -> AnnotatedText {
    let mut display = String::new();
    let mut reading = String::new();
    let mut kanji = String::new();

    let mut last = 0;
    for caps in annotation_regex().captures_iter(text) {
        let matched = caps.get(0).expect("whole match");

        let plain = &text[last..matched.start()];
        display.push_str(plain);
        reading.push_str(plain);

        let base = &caps[1];
        display.push_str(base);
        kanji.push_str(base);
        reading.push_str(&caps[2]);

        last = matched.end();
    }

    let tail = &text[last..];
    display.push_str(tail);
    reading.push_str(tail);

    AnnotatedText { display, reading, kanji }
}

pub fn has_kanji(text: &str) -> bool {
    text.chars().any(|c| c.is_kanji())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_fully_annotated_text() {
        let annotated = annotate(&[("漢", Some("かん")), ("字", Some("じ"))]);
        assert_eq!(annotated, "{漢}(かん){字}(じ)");

        let parsed = parse_annotated(&annotated);
        assert_eq!(parsed.display, "漢字");
        assert_eq!(parsed.reading, "かんじ");
        assert_eq!(parsed.kanji, "漢字");
    }

    #[test]
    fn round_trips_mixed_kanji_and_kana() {
        let annotated = annotate(&[("食", Some("た")), ("べる", None)]);
        assert_eq!(annotated, "{食}(た)べる");

        let parsed = parse_annotated(&annotated);
        assert_eq!(parsed.display, "食べる");
        assert_eq!(parsed.reading, "たべる");
        assert_eq!(parsed.kanji, "食");
    }

    #[test]
    fn plain_kana_passes_through() {
        let parsed = parse_annotated("ひらがな");
        assert_eq!(parsed.display, "ひらがな");
        assert_eq!(parsed.reading, "ひらがな");
        assert_eq!(parsed.kanji, "");
    }

    #[test]
    fn detects_kanji() {
        assert!(has_kanji("食べる"));
        assert!(!has_kanji("たべる"));
        assert!(!has_kanji("hello"));
    }
}
