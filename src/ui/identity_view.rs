//! UI ввода Telegram ID

use crate::app::App;
use eframe::egui;

impl App {
    pub fn render_identity_prompt(&mut self, ui: &mut egui::Ui) {
        let t = self.t();
        let mut submit = false;
        let mut skip = false;

        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.heading(t.identity_title);
            ui.add_space(10.0);
            ui.label(t.identity_prompt);
            ui.add_space(5.0);
            ui.colored_label(egui::Color32::GRAY, t.identity_how_to);
            ui.add_space(15.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.identity_input)
                    .hint_text(t.identity_placeholder)
                    .desired_width(280.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }

            if let Some(error) = &self.identity_error {
                ui.add_space(5.0);
                ui.colored_label(egui::Color32::RED, error);
            }

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button(t.identity_save).clicked() {
                    submit = true;
                }
                if ui.button(t.identity_skip).clicked() {
                    skip = true;
                }
            });
            ui.add_space(5.0);
            ui.colored_label(egui::Color32::GRAY, t.identity_warning);
        });

        if submit {
            self.submit_identity();
        } else if skip {
            self.skip_identity();
        }
    }
}
