use eframe::egui;

use super::theme::Theme;

const MAX_LINES: usize = 1000;

#[derive(Debug, Clone, Copy)]
pub enum LogKind {
    Info,
    Ok,
    Err,
    Data,
}

/// Scrolling activity log at the bottom of the window. Pipeline progress,
/// publish progress and errors all land here.
pub struct LogPanel {
    lines: Vec<(LogKind, String)>,
}

impl LogPanel {
    pub fn new() -> Self {
        Self { lines: vec![(LogKind::Ok, "ready".to_string())] }
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>) {
        self.lines.push((kind, message.into()));
        if self.lines.len() > MAX_LINES {
            let excess = self.lines.len() - MAX_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogKind::Info, message);
    }

    pub fn ok(&mut self, message: impl Into<String>) {
        self.push(LogKind::Ok, message);
    }

    pub fn err(&mut self, message: impl Into<String>) {
        self.push(LogKind::Err, message);
    }

    pub fn data(&mut self, message: impl Into<String>) {
        self.push(LogKind::Data, message);
    }

    pub fn show(&self, ctx: &egui::Context, theme: &Theme) {
        egui::TopBottomPanel::bottom("log_panel").exact_height(120.0).show(ctx, |ui| {
            egui::ScrollArea::vertical().stick_to_bottom(true).auto_shrink(false).show(ui, |ui| {
                for (kind, line) in &self.lines {
                    let text = egui::RichText::new(line).size(11.0).monospace();
                    let text = match kind {
                        LogKind::Info => text,
                        LogKind::Ok => text.color(theme.green()),
                        LogKind::Err => text.color(theme.red()),
                        LogKind::Data => text.color(theme.comment()),
                    };
                    ui.label(text);
                }
            });
        });
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}
