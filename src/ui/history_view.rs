//! UI для истории переводов

use crate::app::App;
use eframe::egui;
use slanglit::i18n::Language;
use slanglit::utils::truncate_string;
use slanglit::view::page_buttons;

impl App {
    pub fn render_history_screen(&mut self, ui: &mut egui::Ui) {
        let t = self.t();
        let Some(session) = &self.session else { return };

        ui.horizontal(|ui| {
            ui.heading(t.history_title);
            if self.history_loading {
                ui.spinner();
            }
        });
        ui.add_space(5.0);

        if !session.history().is_recording() {
            ui.colored_label(egui::Color32::GRAY, t.history_unavailable);
            ui.label(t.history_unavailable_hint);
            ui.add_space(10.0);
            if ui.button(t.change_user).clicked() {
                self.forget_identity();
            }
            return;
        }

        // Статистика
        if let Some(stats) = &self.stats {
            let label = match self.language {
                Language::Russian => format!(
                    "Всего: {} | сленг → русский: {} | русский → сленг: {}",
                    stats.total, stats.to_formal, stats.to_informal
                ),
                Language::English => format!(
                    "Total: {} | slang → Russian: {} | Russian → slang: {}",
                    stats.total, stats.to_formal, stats.to_informal
                ),
            };
            ui.label(label);
        }

        let mut clear = false;
        let mut forget = false;
        ui.horizontal(|ui| {
            let clearable = session.history().is_clearable();
            let button = ui.add_enabled(clearable, egui::Button::new(t.clear_history));
            if button.on_disabled_hover_text(t.clear_history_unsupported).clicked() {
                clear = true;
            }
            if ui.button(t.change_user).clicked() {
                forget = true;
            }
        });
        ui.separator();
        ui.add_space(5.0);

        if session.history().is_empty() {
            let message = if session.history().load_error().is_some() {
                t.history_load_failed
            } else {
                t.history_empty
            };
            ui.colored_label(egui::Color32::GRAY, message);
        }

        let page = session.history_page();
        let mut replay = None;
        let mut select_page = None;

        egui::ScrollArea::vertical()
            .id_salt("history_scroll")
            .max_height((ui.available_height() - 40.0).max(100.0))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (idx, entry) in page.items.iter().enumerate() {
                    let response = egui::Frame::group(ui.style())
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(truncate_string(&entry.original, 60)).strong());
                                ui.label("→");
                                ui.label(truncate_string(&entry.translation, 60));
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    ui.colored_label(egui::Color32::GRAY, entry.formatted_time());
                                });
                            });
                            if !entry.explanation.is_empty() {
                                ui.colored_label(egui::Color32::GRAY, truncate_string(&entry.explanation, 120));
                            }
                        })
                        .response
                        .interact(egui::Sense::click())
                        .on_hover_text(t.replay_tooltip);

                    if response.clicked() {
                        replay = Some(idx);
                    }
                }
            });

        // Пагинация показывается только если страниц больше одной
        let buttons = page_buttons(page.total_pages);
        if !buttons.is_empty() {
            ui.horizontal(|ui| {
                for number in buttons {
                    if ui.selectable_label(number == page.page, number.to_string()).clicked() {
                        select_page = Some(number);
                    }
                }
            });
        }

        if clear {
            self.clear_history();
        } else if forget {
            self.forget_identity();
        } else if let Some(number) = select_page {
            if let Some(session) = &mut self.session {
                session.select_page(number);
            }
        } else if let Some(idx) = replay {
            self.replay(idx);
        }
    }
}
