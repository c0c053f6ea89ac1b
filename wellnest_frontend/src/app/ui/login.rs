use eframe::egui::{self, RichText};

use crate::app::WellnestApp;
use crate::theme;

impl WellnestApp {
    pub(crate) fn render_login(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.label(RichText::new("WellNest").size(36.0).strong().color(theme::BRAND));
            ui.label(RichText::new("우리 가족 건강 지킴이").color(theme::MUTED));
            ui.add_space(48.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.pages.login_name)
                    .hint_text(self.config.default_user_name.as_str())
                    .desired_width(240.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));

            ui.add_space(12.0);
            let button = egui::Button::new(RichText::new("시작하기").color(egui::Color32::WHITE))
                .fill(theme::BRAND)
                .min_size(egui::vec2(240.0, 40.0));
            if ui.add(button).clicked() || submitted {
                self.login();
            }
        });
    }
}
