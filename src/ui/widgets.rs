//! Общие виджеты UI

use crate::app::App;
use eframe::egui;
use slanglit::session::{Screen, Tone};
use slanglit::view::NavState;

/// Цвет карточки результата
pub fn tone_color(tone: Tone) -> egui::Color32 {
    match tone {
        Tone::Placeholder | Tone::Pending => egui::Color32::GRAY,
        Tone::Success => egui::Color32::from_rgb(80, 200, 120),
        Tone::NotFound => egui::Color32::from_rgb(230, 180, 60),
        Tone::Error => egui::Color32::from_rgb(220, 80, 80),
    }
}

/// Карточка с заголовком
pub fn card(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(heading).strong().color(egui::Color32::LIGHT_GRAY));
        ui.add_space(4.0);
        add_contents(ui);
    });
}

impl App {
    /// Кнопки "Перевод"/"История". Возвращает выбранный экран.
    pub fn render_nav(&self, ui: &mut egui::Ui, nav: NavState) -> Option<Screen> {
        let t = self.t();
        let (translate_active, history_active) = if nav.translate_visible {
            (nav.translate_nav_on_translate, nav.history_nav_on_translate)
        } else {
            (nav.translate_nav_on_history, nav.history_nav_on_history)
        };

        let mut selected = None;
        ui.horizontal(|ui| {
            if ui
                .selectable_label(translate_active, format!("🔤 {}", t.nav_translate))
                .clicked()
            {
                selected = Some(Screen::Translate);
            }
            if ui
                .selectable_label(history_active, format!("📜 {}", t.nav_history))
                .clicked()
            {
                selected = Some(Screen::History);
            }
        });
        selected
    }
}
