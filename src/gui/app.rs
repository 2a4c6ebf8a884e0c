use chrono::Local;
use eframe::egui;

use super::{
    error_modal::ErrorModal,
    image_panel::{
        ImageAction,
        ImagePanel,
    },
    log_panel::LogPanel,
    quiz_panel::{
        QuizAction,
        QuizPanel,
    },
    settings::{
        SettingsData,
        SettingsModal,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
    word_table::WordTable,
};
use crate::{
    agent::AgentHandle,
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        JapaneseWord,
        SelectedImage,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
};

const SETTINGS_FILE: &str = "settings.json";

pub struct MochimineApp {
    // Session data
    image: Option<SelectedImage>,
    words: Vec<JapaneseWord>,
    deck_name: String,

    // Configuration
    settings_data: SettingsData,

    // External services
    agent: Option<AgentHandle>,
    agent_checked: bool,

    // Busy flags; each one blocks re-triggering its own action
    parsing: bool,
    publishing: bool,
    fetching: bool,
    publish_progress: Option<(usize, usize)>,

    // UI
    theme: Theme,
    log: LogPanel,
    error_modal: ErrorModal,
    settings_modal: SettingsModal,
    quiz_panel: QuizPanel,

    task_manager: TaskManager,
}

impl MochimineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let task_manager = TaskManager::new();
        task_manager.locate_agent();

        let settings_data = load_json_or_default::<SettingsData>(SETTINGS_FILE);

        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, &theme);
        setup_fonts(&cc.egui_ctx);

        Self {
            image: None,
            words: Vec::new(),
            deck_name: String::new(),

            settings_data,

            agent: None,
            agent_checked: false,

            parsing: false,
            publishing: false,
            fetching: false,
            publish_progress: None,

            theme,
            log: LogPanel::new(),
            error_modal: ErrorModal::new(),
            settings_modal: SettingsModal::new(),
            quiz_panel: QuizPanel::new(),

            task_manager,
        }
    }

    fn handle_task_results(&mut self) {
        for result in self.task_manager.poll_results() {
            match result {
                TaskResult::AgentLocated(handle) => {
                    self.agent_checked = true;
                    match &handle {
                        Some(agent) => self
                            .log
                            .ok(format!("Claude CLI found at {}", agent.path().display())),
                        None => {
                            self.log.err("Claude CLI not found — word extraction is disabled.")
                        }
                    }
                    self.agent = handle;
                }

                TaskResult::PipelineProgress(message) => self.log.data(message),

                TaskResult::WordsParsed(result) => {
                    self.parsing = false;
                    match result {
                        Ok(words) => {
                            if words.is_empty() {
                                self.log.err("no words found");
                            } else {
                                self.log.ok(format!("{} words extracted", words.len()));
                            }
                            self.words = words;
                        }
                        Err(e) => {
                            self.log.err(&e);
                            self.error_modal.show_error("Extraction failed", e);
                        }
                    }
                }

                TaskResult::DeckProgress { processed, total } => {
                    self.publish_progress = Some((processed, total));
                }

                TaskResult::DeckPublished(result) => {
                    self.publishing = false;
                    self.publish_progress = None;
                    match result {
                        Ok(summary) => {
                            self.log.ok(format!(
                                "created {}/{} cards in \"{}\" ({})",
                                summary.cards_created,
                                summary.total_words,
                                summary.deck_name,
                                summary.deck_id
                            ));
                            // Published batch is done; reset for the next image.
                            self.image = None;
                            self.words.clear();
                            self.deck_name.clear();
                        }
                        Err(e) => {
                            self.log.err(&e);
                            self.error_modal.show_error("Deck creation failed", e);
                        }
                    }
                }

                TaskResult::CardsFetched(result) => {
                    self.fetching = false;
                    match result {
                        Ok(cards) => {
                            self.log.ok(format!("fetched {} cards", cards.len()));
                            self.quiz_panel.set_cards(cards);
                        }
                        Err(e) => {
                            self.log.err(&e);
                            self.error_modal.show_error("Card fetch failed", e);
                        }
                    }
                }
            }
        }
    }

    fn start_parse(&mut self) {
        if self.parsing {
            return;
        }
        let Some(image) = self.image.clone() else {
            return;
        };
        let Some(agent) = self.agent.clone() else {
            self.error_modal.show_error(
                "Claude CLI unavailable",
                crate::core::MochimineError::AgentUnavailable.to_string(),
            );
            return;
        };
        if self.settings_data.ocr_token.trim().is_empty() {
            self.error_modal
                .show_error("Missing OCR token", "Set the OCR token in Settings → API Keys.");
            return;
        }

        self.parsing = true;
        self.log.info(format!("parsing {}...", image.name));
        self.task_manager.parse_image(image, self.settings_data.ocr_token.clone(), agent);
    }

    fn start_publish(&mut self) {
        if self.publishing || self.words.is_empty() {
            return;
        }
        if self.settings_data.mochi_api_key.trim().is_empty() {
            self.error_modal
                .show_error("Missing API key", "Set the Mochi API key in Settings → API Keys.");
            return;
        }

        let deck_name = match self.deck_name.trim() {
            "" => format!("JP {}", Local::now().format("%Y-%m-%d")),
            name => name.to_string(),
        };

        self.publishing = true;
        self.log.info(format!("creating deck \"{}\"...", deck_name));
        self.task_manager.publish_deck(
            self.settings_data.mochi_api_key.clone(),
            deck_name,
            self.words.clone(),
        );
    }

    fn start_fetch(&mut self, deck_id: String) {
        if self.fetching {
            return;
        }
        if self.settings_data.mochi_api_key.trim().is_empty() {
            self.error_modal
                .show_error("Missing API key", "Set the Mochi API key in Settings → API Keys.");
            return;
        }

        self.fetching = true;
        self.log.info(format!("fetching cards from {}...", deck_id.trim()));
        self.task_manager.fetch_cards(self.settings_data.mochi_api_key.clone(), deck_id);
    }
}

impl eframe::App for MochimineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_task_results();

        // Background work reports over a channel, not through egui events,
        // so keep repainting while anything is in flight.
        if self.parsing || self.publishing || self.fetching || !self.agent_checked {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        if let Some(action) = TopBar::show(ctx, self.agent.as_ref(), self.agent_checked) {
            match action {
                TopBarAction::OpenSettings => {
                    self.settings_modal.open_settings(self.settings_data.clone());
                }
                TopBarAction::OpenQuiz => self.quiz_panel.open = true,
                TopBarAction::ClearImage => self.image = None,
            }
        }

        self.log.show(ctx, &self.theme);

        egui::SidePanel::left("image_panel").default_width(240.0).show(ctx, |ui| {
            let action = ImagePanel::show(
                ui,
                self.image.as_ref(),
                self.parsing,
                self.agent.is_some(),
                &self.theme,
            );

            match action {
                Some(ImageAction::Selected(image)) => {
                    self.log.data(image.name.clone());
                    self.image = Some(image);
                    // A fresh image always pairs with an empty word list.
                    self.words.clear();
                }
                Some(ImageAction::SelectFailed(e)) => {
                    self.log.err(&e);
                    self.error_modal.show_error("Could not read image", e);
                }
                Some(ImageAction::Cleared) => self.image = None,
                Some(ImageAction::ParseRequested) => self.start_parse(),
                None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.theme.heading("Words"));
            ui.add_space(4.0);

            if self.words.is_empty() {
                ui.label("No cards yet — select an image and parse it.");
                return;
            }

            ui.horizontal(|ui| {
                ui.label("Deck name:");
                ui.add(egui::TextEdit::singleline(&mut self.deck_name).desired_width(200.0));

                let label = if self.publishing { "Creating…" } else { "Create Deck" };
                if ui.add_enabled(!self.publishing, egui::Button::new(label)).clicked() {
                    self.start_publish();
                }
            });

            if let Some((processed, total)) = self.publish_progress {
                let fraction = if total == 0 { 0.0 } else { processed as f32 / total as f32 };
                ui.add(
                    egui::ProgressBar::new(fraction).text(format!("{}/{}", processed, total)),
                );
            }

            ui.separator();

            if let Some(removed) = WordTable::show(ui, &self.words, &self.theme) {
                self.words.remove(removed);
            }
        });

        if let Some(QuizAction::FetchRequested(deck_id)) =
            self.quiz_panel.show(ctx, &self.theme, self.fetching)
        {
            self.start_fetch(deck_id);
        }

        self.settings_modal.show(ctx);
        if let Some(settings) = self.settings_modal.take_saved() {
            self.settings_data = settings;
            match save_json(&self.settings_data, SETTINGS_FILE) {
                Ok(()) => self.log.ok("settings saved"),
                Err(e) => self.log.err(format!("failed to save settings: {}", e)),
            }
        }

        self.error_modal.show(ctx);
    }
}

/// egui's bundled fonts have no CJK coverage; pull in a system font that
/// does, when one exists.
fn setup_fonts(ctx: &egui::Context) {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/Hiragino Sans GB.ttc",
        "C:\\Windows\\Fonts\\meiryo.ttc",
        "C:\\Windows\\Fonts\\msgothic.ttc",
    ];

    for path in CANDIDATES {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts.font_data.insert(
            "japanese".to_owned(),
            std::sync::Arc::new(egui::FontData::from_owned(bytes)),
        );
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push("japanese".to_owned());
        }
        ctx.set_fonts(fonts);
        return;
    }

    eprintln!("No Japanese-capable system font found; kanji may not render.");
}
