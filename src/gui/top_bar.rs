use eframe::egui::{
    self,
    containers,
};

use crate::agent::AgentHandle;

pub enum TopBarAction {
    OpenSettings,
    OpenQuiz,
    ClearImage,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        agent: Option<&AgentHandle>,
        agent_checked: bool,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Clear Image").clicked() {
                        action = Some(TopBarAction::ClearImage);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Settings", |ui| {
                    if ui.button("API Keys").clicked() {
                        action = Some(TopBarAction::OpenSettings);
                    }
                });

                ui.menu_button("Quiz", |ui| {
                    if ui.button("Open Quiz").clicked() {
                        action = Some(TopBarAction::OpenQuiz);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_agent_indicator(ui, agent, agent_checked);
                });
            });
        });

        action
    }

    fn show_agent_indicator(ui: &mut egui::Ui, agent: Option<&AgentHandle>, agent_checked: bool) {
        let (color, tooltip) = match (agent_checked, agent) {
            (false, _) => {
                (egui::Color32::from_rgb(180, 180, 80), "Looking for Claude CLI…".to_string())
            }
            (true, Some(agent)) => (
                egui::Color32::from_rgb(0, 200, 0),
                format!("Claude CLI: {}", agent.path().display()),
            ),
            (true, None) => {
                (egui::Color32::from_rgb(200, 80, 80), "Claude CLI not found".to_string())
            }
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Claude").on_hover_text(tooltip.clone());
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
        });
    }
}
