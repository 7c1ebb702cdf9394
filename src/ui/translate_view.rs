//! UI экрана перевода

use super::widgets::{card, tone_color};
use crate::app::App;
use eframe::egui;
use slanglit::session::Tone;

impl App {
    pub fn render_translate_screen(&mut self, ui: &mut egui::Ui) {
        let t = self.t();
        let Some(session) = &mut self.session else { return };
        let labels = session.labels();

        let mut toggle = false;
        let mut translate = false;

        // Направление: "сленговый ⇄ русский"
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(labels.left_label).size(16.0));
            if ui.button("⇄").on_hover_text(t.swap_tooltip).clicked() {
                toggle = true;
            }
            ui.label(egui::RichText::new(labels.right_label).size(16.0));
        });
        ui.add_space(8.0);

        card(ui, labels.left_heading, |ui| {
            let response = ui.add(
                egui::TextEdit::multiline(session.input_mut())
                    .hint_text(labels.placeholder)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
            // Ctrl+Enter - перевести
            if response.has_focus() && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter)) {
                translate = true;
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let pending = session.is_pending();
            if ui
                .add_enabled(!pending, egui::Button::new(egui::RichText::new(t.translate_button).strong()))
                .clicked()
            {
                translate = true;
            }
            if pending {
                ui.spinner();
            }
        });
        ui.add_space(8.0);

        let display = session.display().clone();
        card(ui, labels.right_heading, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&display.translation)
                        .size(18.0)
                        .color(tone_color(display.tone)),
                );
                if display.tone == Tone::Success && ui.small_button("📋").on_hover_text(t.copy).clicked() {
                    ui.ctx().copy_text(display.translation.clone());
                }
            });
        });

        ui.add_space(8.0);
        card(ui, t.explanation_title, |ui| {
            ui.label(&display.explanation);
        });

        if toggle {
            session.toggle_direction();
        }
        if translate {
            self.translate();
        }
    }
}
