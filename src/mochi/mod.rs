//! Deck publishing and card read-back against the Mochi service.

pub mod api;

use std::future::Future;

use reqwest::Client;

use crate::core::{
    furigana,
    DeckResult,
    JapaneseWord,
    MochimineError,
    RemoteCard,
};

/// Fixed page size for the read path; decks published by this app fit well
/// under it.
pub const PAGE_LIMIT: usize = 100;

const FRONT_BACK_SEPARATOR: &str = "\n\n---\n\n";

/// Users tend to paste deck ids with Mochi's link decoration still attached.
/// `"[[abc123]]"` -> `"abc123"`.
pub fn clean_deck_id(raw: &str) -> String {
    raw.chars().filter(|c| *c != '[' && *c != ']').collect::<String>().trim().to_string()
}

/// Renders one word into Mochi's card markdown: annotated front, separator,
/// meaning on the back. Words without an annotated form fall back to the
/// plain surface form.
pub fn card_content(word: &JapaneseWord) -> String {
    let front = if word.furigana.trim().is_empty() { &word.word } else { &word.furigana };
    format!("# {}{}{}", front, FRONT_BACK_SEPARATOR, word.meaning)
}

/// Inverse of `card_content`: recover the structured fields from a fetched
/// card's stored text.
pub fn parse_card(content: &str) -> RemoteCard {
    let (front_raw, meaning) = match content.split_once(FRONT_BACK_SEPARATOR) {
        Some((front, back)) => (front, back),
        None => (content, ""),
    };

    let front_raw = front_raw.trim_start().trim_start_matches('#').trim();
    let annotated = furigana::parse_annotated(front_raw);

    RemoteCard {
        front: annotated.display,
        reading: annotated.reading,
        kanji: annotated.kanji,
        meaning: meaning.trim().to_string(),
    }
}

/// Creates one deck, then one card per word strictly in list order.
///
/// Progress fires with `(processed, total)` after every card, plus an
/// initial `(0, total)` before the deck call — N+1 events for N words. Deck
/// creation failure aborts; individual card failures are counted and
/// swallowed, so `cards_created` may come back short of `total_words`.
pub async fn publish_deck<P>(
    api_key: &str,
    deck_name: &str,
    words: &[JapaneseWord],
    mut progress: P,
) -> Result<DeckResult, MochimineError>
where
    P: FnMut(usize, usize),
{
    if api_key.trim().is_empty() {
        return Err(MochimineError::MissingCredential("Mochi API key"));
    }

    progress(0, words.len());

    let client = Client::new();
    let deck_id = api::create_deck(&client, api_key, deck_name).await?;

    let cards_created = create_cards(
        words,
        |content| {
            let client = client.clone();
            let api_key = api_key.to_string();
            let deck_id = deck_id.clone();
            async move { api::create_card(&client, &api_key, &deck_id, &content).await }
        },
        &mut progress,
    )
    .await;

    Ok(DeckResult {
        deck_id,
        deck_name: deck_name.to_string(),
        cards_created,
        total_words: words.len(),
    })
}

/// The per-card loop, split from the HTTP layer so the progress and
/// partial-success contracts can be exercised without a live service.
async fn create_cards<F, Fut, P>(words: &[JapaneseWord], mut create: F, progress: &mut P) -> usize
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(), MochimineError>>,
    P: FnMut(usize, usize),
{
    let total = words.len();
    let mut created = 0;

    for (done, word) in words.iter().enumerate() {
        match create(card_content(word)).await {
            Ok(()) => created += 1,
            Err(e) => eprintln!("Card creation failed for {}: {}", word.word, e),
        }
        progress(done + 1, total);
    }

    created
}

/// Fetches up to one page of cards from a deck and reverse-parses each one.
/// A failed HTTP call aborts the whole read.
pub async fn fetch_cards(api_key: &str, deck_id: &str) -> Result<Vec<RemoteCard>, MochimineError> {
    if api_key.trim().is_empty() {
        return Err(MochimineError::MissingCredential("Mochi API key"));
    }

    let deck_id = clean_deck_id(deck_id);
    if deck_id.is_empty() {
        return Err(MochimineError::Custom("deck id is empty".to_string()));
    }

    let docs = api::list_cards(&Client::new(), api_key, &deck_id, PAGE_LIMIT).await?;
    Ok(docs.iter().map(|doc| parse_card(&doc.content)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(surface: &str, reading: &str, meaning: &str, furigana: &str) -> JapaneseWord {
        JapaneseWord {
            word: surface.to_string(),
            reading: reading.to_string(),
            meaning: meaning.to_string(),
            furigana: furigana.to_string(),
        }
    }

    #[test]
    fn cleans_pasted_deck_ids() {
        assert_eq!(clean_deck_id("[[abc123]]"), "abc123");
        assert_eq!(clean_deck_id("  [[abc123]]  "), "abc123");
        assert_eq!(clean_deck_id("abc123"), "abc123");
        assert_eq!(clean_deck_id("[[ abc123 ]]"), "abc123");
    }

    #[test]
    fn renders_card_content_with_annotated_front() {
        let w = word("漢字", "かんじ", "kanji", "{漢}(かん){字}(じ)");
        assert_eq!(card_content(&w), "# {漢}(かん){字}(じ)\n\n---\n\nkanji");
    }

    #[test]
    fn falls_back_to_plain_word_without_furigana() {
        let w = word("ねこ", "ねこ", "cat", "");
        assert_eq!(card_content(&w), "# ねこ\n\n---\n\ncat");
    }

    #[test]
    fn card_content_parses_back_to_its_fields() {
        let w = word("漢字", "かんじ", "kanji", "{漢}(かん){字}(じ)");
        let card = parse_card(&card_content(&w));

        assert_eq!(card.front, "漢字");
        assert_eq!(card.reading, "かんじ");
        assert_eq!(card.kanji, "漢字");
        assert_eq!(card.meaning, "kanji");
    }

    #[test]
    fn parses_card_without_separator_as_front_only() {
        let card = parse_card("# ひらがな");
        assert_eq!(card.front, "ひらがな");
        assert_eq!(card.meaning, "");
    }

    #[tokio::test]
    async fn counts_failures_and_reports_every_card() {
        let words: Vec<JapaneseWord> = (0..5)
            .map(|i| word(&format!("単語{}", i), "よみ", "meaning", ""))
            .collect();

        // Cards 1 and 3 fail remotely.
        let mut attempt = 0;
        let mut events: Vec<(usize, usize)> = vec![(0, words.len())];

        let created = create_cards(
            &words,
            |_content| {
                let failing = attempt == 1 || attempt == 3;
                attempt += 1;
                async move {
                    if failing {
                        Err(MochimineError::Custom("remote rejected card".to_string()))
                    } else {
                        Ok(())
                    }
                }
            },
            &mut |done, total| events.push((done, total)),
        )
        .await;

        assert_eq!(created, 3);
        assert_eq!(events.len(), words.len() + 1);
        for (i, (done, total)) in events.iter().enumerate() {
            assert_eq!(*done, i);
            assert_eq!(*total, words.len());
        }
    }
}
