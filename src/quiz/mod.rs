//! Quiz generation over cards fetched back from a deck. Pure functions plus
//! one small scoring struct; all randomness comes in through the caller's rng.

use rand::{
    seq::{
        IndexedRandom,
        SliceRandom,
    },
    Rng,
};

use crate::core::{
    MochimineError,
    RemoteCard,
};

/// The adaptive quiz needs one correct answer plus five distractors, each
/// from a distinct card.
pub const MIN_ADAPTIVE_CARDS: usize = 6;

const CHOICE_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Reading,
    Meaning,
    Kanji,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Reading => "reading",
            Dimension::Meaning => "meaning",
            Dimension::Kanji => "kanji",
        }
    }

    fn value<'a>(&self, card: &'a RemoteCard) -> &'a str {
        match self {
            Dimension::Reading => &card.reading,
            Dimension::Meaning => &card.meaning,
            Dimension::Kanji => &card.kanji,
        }
    }

    /// What the question side shows for a card when this is the asked-for
    /// dimension.
    fn prompt_for(&self, card: &RemoteCard) -> String {
        match self {
            Dimension::Reading | Dimension::Meaning => card.front.clone(),
            Dimension::Kanji => format!("{} ({})", card.reading, card.meaning),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub prompt: String,
    pub answer: String,
    pub dimension: Dimension,
}

/// Fixed quiz: shuffle the whole card list once, then ask one randomly
/// chosen dimension per card. Cards with no usable value for any selected
/// dimension are skipped.
pub fn fixed_quiz(
    cards: &[RemoteCard],
    dimensions: &[Dimension],
    rng: &mut impl Rng,
) -> Vec<QuizQuestion> {
    if dimensions.is_empty() {
        return Vec::new();
    }

    let mut deck: Vec<&RemoteCard> = cards.iter().collect();
    deck.shuffle(rng);

    deck.into_iter()
        .filter_map(|card| {
            let usable: Vec<Dimension> =
                dimensions.iter().copied().filter(|d| !d.value(card).is_empty()).collect();
            let dimension = *usable.choose(rng)?;

            Some(QuizQuestion {
                prompt: dimension.prompt_for(card),
                answer: dimension.value(card).to_string(),
                dimension,
            })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct AdaptiveQuestion {
    pub prompt: String,
    /// Six options, shuffled; exactly one is correct and no two are equal.
    pub choices: Vec<String>,
    pub answer_index: usize,
    pub answer_dimension: Dimension,
}

/// The endless multiple-choice mode: one random card per round, question and
/// answer drawn from different dimensions, right/wrong running score.
#[derive(Debug)]
pub struct AdaptiveQuiz {
    cards: Vec<RemoteCard>,
    dimensions: Vec<Dimension>,
    pub correct: usize,
    pub answered: usize,
}

impl AdaptiveQuiz {
    pub fn new(
        cards: Vec<RemoteCard>,
        dimensions: Vec<Dimension>,
    ) -> Result<Self, MochimineError> {
        if dimensions.is_empty() {
            return Err(MochimineError::Custom("select at least one quiz dimension".to_string()));
        }
        if cards.len() < MIN_ADAPTIVE_CARDS {
            return Err(MochimineError::Custom(format!(
                "the adaptive quiz needs at least {} cards, deck has {}",
                MIN_ADAPTIVE_CARDS,
                cards.len()
            )));
        }

        Ok(Self { cards, dimensions, correct: 0, answered: 0 })
    }

    /// Builds the next round, or `None` when the loaded cards cannot produce
    /// six distinct options for any sampled combination.
    pub fn next_question(&self, rng: &mut impl Rng) -> Option<AdaptiveQuestion> {
        for _ in 0..32 {
            let answer_dimension = *self.dimensions.choose(rng)?;
            let question_dimension = self.pick_question_dimension(answer_dimension, rng)?;

            let card_index = rng.random_range(0..self.cards.len());
            let card = &self.cards[card_index];

            let question_value = question_dimension.value(card);
            let answer_value = answer_dimension.value(card);
            if question_value.is_empty() || answer_value.is_empty() {
                continue;
            }

            let Some(mut choices) =
                self.sample_choices(card_index, answer_dimension, answer_value, rng)
            else {
                continue;
            };

            choices.shuffle(rng);
            let answer_index = choices.iter().position(|choice| choice == answer_value)?;

            return Some(AdaptiveQuestion {
                prompt: format!(
                    "{} — {}?",
                    question_dimension.prompt_for(card),
                    answer_dimension.label()
                ),
                choices,
                answer_index,
                answer_dimension,
            });
        }

        None
    }

    pub fn record(&mut self, was_correct: bool) {
        self.answered += 1;
        if was_correct {
            self.correct += 1;
        }
    }

    fn pick_question_dimension(
        &self,
        answer_dimension: Dimension,
        rng: &mut impl Rng,
    ) -> Option<Dimension> {
        // Question and answer come from different dimensions; with a single
        // selected dimension that is all there is.
        if self.dimensions.len() == 1 {
            return Some(answer_dimension);
        }

        let others: Vec<Dimension> =
            self.dimensions.iter().copied().filter(|d| *d != answer_dimension).collect();
        others.choose(rng).copied()
    }

    /// One correct value plus five distractors from other cards, all six
    /// pairwise distinct as strings.
    fn sample_choices(
        &self,
        card_index: usize,
        answer_dimension: Dimension,
        answer_value: &str,
        rng: &mut impl Rng,
    ) -> Option<Vec<String>> {
        let mut others: Vec<usize> =
            (0..self.cards.len()).filter(|i| *i != card_index).collect();
        others.shuffle(rng);

        let mut choices = vec![answer_value.to_string()];
        for i in others {
            let value = answer_dimension.value(&self.cards[i]);
            if value.is_empty() || choices.iter().any(|c| c == value) {
                continue;
            }
            choices.push(value.to_string());
            if choices.len() == CHOICE_COUNT {
                return Some(choices);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    fn card(front: &str, reading: &str, kanji: &str, meaning: &str) -> RemoteCard {
        RemoteCard {
            front: front.to_string(),
            reading: reading.to_string(),
            kanji: kanji.to_string(),
            meaning: meaning.to_string(),
        }
    }

    fn sample_cards(n: usize) -> Vec<RemoteCard> {
        (0..n)
            .map(|i| {
                card(
                    &format!("単語{}", i),
                    &format!("たんご{}", i),
                    &format!("単語{}", i),
                    &format!("word {}", i),
                )
            })
            .collect()
    }

    #[test]
    fn fixed_quiz_covers_every_card_once() {
        let cards = sample_cards(8);
        let mut rng = StdRng::seed_from_u64(7);

        let questions = fixed_quiz(&cards, &[Dimension::Reading, Dimension::Meaning], &mut rng);
        assert_eq!(questions.len(), cards.len());
        for q in &questions {
            assert!(!q.answer.is_empty());
        }
    }

    #[test]
    fn fixed_quiz_skips_cards_without_kanji_in_kanji_mode() {
        let mut cards = sample_cards(3);
        cards.push(card("ひらがな", "ひらがな", "", "hiragana"));
        let mut rng = StdRng::seed_from_u64(7);

        let questions = fixed_quiz(&cards, &[Dimension::Kanji], &mut rng);
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn adaptive_quiz_refuses_small_decks() {
        let result = AdaptiveQuiz::new(sample_cards(5), vec![Dimension::Reading]);
        assert!(result.is_err());

        assert!(AdaptiveQuiz::new(sample_cards(6), vec![Dimension::Reading]).is_ok());
    }

    #[test]
    fn adaptive_choices_are_distinct_and_contain_the_answer() {
        let quiz =
            AdaptiveQuiz::new(sample_cards(10), vec![Dimension::Reading, Dimension::Meaning])
                .unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let question = quiz.next_question(&mut rng).unwrap();
            assert_eq!(question.choices.len(), 6);

            for (i, a) in question.choices.iter().enumerate() {
                for b in question.choices.iter().skip(i + 1) {
                    assert_ne!(a, b);
                }
            }

            assert!(question.answer_index < question.choices.len());
        }
    }

    #[test]
    fn adaptive_quiz_gives_up_without_enough_distinct_values() {
        // Six cards but only one distinct meaning: no way to build six
        // distinct meaning choices.
        let cards: Vec<RemoteCard> =
            (0..6).map(|i| card(&format!("語{}", i), &format!("ご{}", i), "", "same")).collect();
        let quiz = AdaptiveQuiz::new(cards, vec![Dimension::Meaning]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(quiz.next_question(&mut rng).is_none());
    }

    #[test]
    fn scoring_counts_rounds_and_hits() {
        let mut quiz = AdaptiveQuiz::new(sample_cards(6), vec![Dimension::Reading]).unwrap();
        quiz.record(true);
        quiz.record(false);
        quiz.record(true);

        assert_eq!(quiz.correct, 2);
        assert_eq!(quiz.answered, 3);
    }
}
