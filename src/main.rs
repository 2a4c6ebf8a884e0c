use eframe::egui;
use mochimine::gui::MochimineApp;

fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Mochimine"),
        ..Default::default()
    };

    eframe::run_native(
        "Mochimine",
        options,
        Box::new(|cc| Ok(Box::new(MochimineApp::new(cc)))),
    )
}
