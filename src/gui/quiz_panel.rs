use eframe::egui;
use rand::rng;

use super::theme::Theme;
use crate::{
    core::{
        furigana,
        RemoteCard,
    },
    quiz::{
        self,
        AdaptiveQuestion,
        AdaptiveQuiz,
        Dimension,
        QuizQuestion,
        MIN_ADAPTIVE_CARDS,
    },
};

pub enum QuizAction {
    FetchRequested(String),
}

enum ActiveQuiz {
    None,
    Fixed { questions: Vec<QuizQuestion>, show_answers: bool },
    Adaptive { quiz: AdaptiveQuiz, question: Option<AdaptiveQuestion>, picked: Option<usize> },
}

/// Quiz window: fetch a deck's cards, pick question dimensions, then run
/// either the one-pass sheet or the endless multiple-choice mode.
pub struct QuizPanel {
    pub open: bool,
    deck_id: String,
    cards: Vec<RemoteCard>,
    use_reading: bool,
    use_meaning: bool,
    use_kanji: bool,
    active: ActiveQuiz,
    hint: Option<String>,
}

impl QuizPanel {
    pub fn new() -> Self {
        Self {
            open: false,
            deck_id: String::new(),
            cards: Vec::new(),
            use_reading: true,
            use_meaning: true,
            use_kanji: false,
            active: ActiveQuiz::None,
            hint: None,
        }
    }

    /// A fresh fetch replaces the card set and resets any running quiz.
    pub fn set_cards(&mut self, cards: Vec<RemoteCard>) {
        self.cards = cards;
        self.active = ActiveQuiz::None;
        self.hint = None;
    }

    fn dimensions(&self) -> Vec<Dimension> {
        let mut dims = Vec::new();
        if self.use_reading {
            dims.push(Dimension::Reading);
        }
        if self.use_meaning {
            dims.push(Dimension::Meaning);
        }
        if self.use_kanji {
            dims.push(Dimension::Kanji);
        }
        dims
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        theme: &Theme,
        fetching: bool,
    ) -> Option<QuizAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        let mut open = self.open;

        egui::Window::new("Quiz")
            .open(&mut open)
            .default_size(egui::Vec2::new(480.0, 420.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Deck ID:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.deck_id).desired_width(180.0),
                    );

                    let can_fetch = !fetching && !self.deck_id.trim().is_empty();
                    let label = if fetching { "Fetching…" } else { "Fetch Cards" };
                    if ui.add_enabled(can_fetch, egui::Button::new(label)).clicked() {
                        action = Some(QuizAction::FetchRequested(self.deck_id.clone()));
                    }
                });

                ui.separator();

                if self.cards.is_empty() {
                    ui.label("Fetch a deck to build a quiz from its cards.");
                    return;
                }

                ui.horizontal(|ui| {
                    ui.label(theme.bold(&format!("{} cards loaded", self.cards.len())));
                    ui.separator();
                    ui.checkbox(&mut self.use_reading, "reading");
                    ui.checkbox(&mut self.use_meaning, "meaning");

                    let any_kanji =
                        self.cards.iter().any(|card| furigana::has_kanji(&card.front));
                    ui.add_enabled(any_kanji, egui::Checkbox::new(&mut self.use_kanji, "kanji"))
                        .on_disabled_hover_text("No kanji in the fetched cards");
                });

                let dims = self.dimensions();

                ui.horizontal(|ui| {
                    if ui.add_enabled(!dims.is_empty(), egui::Button::new("Quiz Sheet")).clicked()
                    {
                        let mut rng = rng();
                        self.active = ActiveQuiz::Fixed {
                            questions: quiz::fixed_quiz(&self.cards, &dims, &mut rng),
                            show_answers: false,
                        };
                        self.hint = None;
                    }

                    let can_start =
                        !dims.is_empty() && self.cards.len() >= MIN_ADAPTIVE_CARDS;
                    if ui.add_enabled(can_start, egui::Button::new("Endless Quiz")).clicked() {
                        match AdaptiveQuiz::new(self.cards.clone(), dims.clone()) {
                            Ok(quiz) => {
                                let mut rng = rng();
                                let question = quiz.next_question(&mut rng);
                                if question.is_none() {
                                    self.hint = Some(
                                        "These cards do not have six distinct values to quiz on."
                                            .to_string(),
                                    );
                                } else {
                                    self.hint = None;
                                }
                                self.active =
                                    ActiveQuiz::Adaptive { quiz, question, picked: None };
                            }
                            Err(e) => self.hint = Some(e.to_string()),
                        }
                    }

                    if self.cards.len() < MIN_ADAPTIVE_CARDS {
                        ui.label(
                            egui::RichText::new(format!(
                                "endless mode needs {} cards",
                                MIN_ADAPTIVE_CARDS
                            ))
                            .size(11.0)
                            .color(theme.comment()),
                        );
                    }
                });

                if let Some(hint) = &self.hint {
                    ui.label(egui::RichText::new(hint).color(theme.orange()));
                }

                ui.separator();

                match &mut self.active {
                    ActiveQuiz::None => {
                        ui.label(
                            egui::RichText::new("Pick a mode above to start.")
                                .color(theme.comment()),
                        );
                    }
                    ActiveQuiz::Fixed { questions, show_answers } => {
                        Self::show_fixed(ui, theme, questions, show_answers);
                    }
                    ActiveQuiz::Adaptive { quiz, question, picked } => {
                        if let Some(hint) = Self::show_adaptive(ui, theme, quiz, question, picked)
                        {
                            self.hint = Some(hint);
                        }
                    }
                }
            });

        self.open = open;
        action
    }

    fn show_fixed(
        ui: &mut egui::Ui,
        theme: &Theme,
        questions: &[QuizQuestion],
        show_answers: &mut bool,
    ) {
        ui.horizontal(|ui| {
            ui.label(theme.heading(&format!("Quiz sheet — {} questions", questions.len())));
            ui.checkbox(show_answers, "show answers");
        });
        ui.add_space(4.0);

        egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
            for (i, question) in questions.iter().enumerate() {
                ui.label(format!(
                    "{}. {} — {}?",
                    i + 1,
                    question.prompt,
                    question.dimension.label()
                ));
                if *show_answers {
                    ui.label(theme.bold(&format!("   {}", question.answer)));
                } else {
                    ui.label("   ＿＿＿＿＿");
                }
                ui.add_space(2.0);
            }
        });
    }

    /// Returns a hint message when the quiz cannot produce another round.
    fn show_adaptive(
        ui: &mut egui::Ui,
        theme: &Theme,
        quiz: &mut AdaptiveQuiz,
        question: &mut Option<AdaptiveQuestion>,
        picked: &mut Option<usize>,
    ) -> Option<String> {
        let mut hint = None;

        ui.label(theme.heading(&format!("Score: {}/{}", quiz.correct, quiz.answered)));
        ui.add_space(4.0);

        let Some(current) = question else {
            ui.label("No more questions.");
            return None;
        };

        ui.label(theme.bold(&current.prompt));
        ui.add_space(6.0);

        for (i, choice) in current.choices.iter().enumerate() {
            match *picked {
                None => {
                    if ui.button(choice).clicked() {
                        quiz.record(i == current.answer_index);
                        *picked = Some(i);
                    }
                }
                Some(chosen) => {
                    let text = if i == current.answer_index {
                        egui::RichText::new(format!("✔ {}", choice)).color(theme.green())
                    } else if i == chosen {
                        egui::RichText::new(format!("✘ {}", choice)).color(theme.red())
                    } else {
                        egui::RichText::new(choice).color(theme.comment())
                    };
                    ui.label(text);
                }
            }
        }

        if picked.is_some() {
            ui.add_space(6.0);
            if ui.button("Next").clicked() {
                let mut rng = rng();
                match quiz.next_question(&mut rng) {
                    Some(next) => {
                        *current = next;
                        *picked = None;
                    }
                    None => {
                        hint = Some(
                            "Could not build another round from these cards.".to_string(),
                        );
                        *question = None;
                    }
                }
            }
        }

        hint
    }
}

impl Default for QuizPanel {
    fn default() -> Self {
        Self::new()
    }
}
