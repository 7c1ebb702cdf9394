//! Модуль пользовательского интерфейса

mod history_view;
mod identity_view;
mod translate_view;
mod widgets;

use crate::app::{ApiStatus, App};
use eframe::egui;
use slanglit::i18n::Language;
use slanglit::session::Screen;
use slanglit::view::NavState;
use std::time::{Duration, Instant};

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Обрабатываем события
        self.process_events();

        // Перерисовка, пока ждём ответ или висит уведомление
        if let Some(session) = &self.session {
            if session.is_pending() || self.history_loading {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            if let Some(notice) = session.notice() {
                let left = notice.expires_at.saturating_duration_since(Instant::now());
                ctx.request_repaint_after(left);
            }
        }
        if self.api_status == ApiStatus::Checking {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        self.render_header(ctx);
        self.render_notice_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.is_none() {
                self.render_identity_prompt(ui);
                return;
            }

            let screen = self.session.as_ref().map(|s| s.screen()).unwrap_or_default();
            let nav = NavState::for_screen(screen);
            if let Some(target) = self.render_nav(ui, nav) {
                self.switch_screen(target);
            }
            ui.separator();
            ui.add_space(5.0);

            if nav.translate_visible {
                self.render_translate_screen(ui);
            } else if nav.history_visible {
                self.render_history_screen(ui);
            }
        });
    }
}

impl App {
    fn switch_screen(&mut self, screen: Screen) {
        let Some(session) = &mut self.session else { return };
        match screen {
            Screen::Translate => session.show_translate(),
            Screen::History => {
                session.show_history();
                self.load_stats();
            }
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        let t = self.t();
        let status = self.api_status.clone();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.heading(t.app_title);
                ui.label(egui::RichText::new(t.app_subtitle).color(egui::Color32::GRAY));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_language_selector(ui);
                });
            });

            ui.horizontal(|ui| {
                ui.label(format!("{}:", t.status));
                match &status {
                    ApiStatus::Checking => {
                        ui.spinner();
                        ui.label(t.api_checking);
                    }
                    ApiStatus::Available => {
                        ui.colored_label(egui::Color32::GREEN, format!("✅ {}", t.api_available));
                    }
                    ApiStatus::Unavailable(reason) => {
                        ui.colored_label(egui::Color32::RED, format!("❌ {}", t.api_unavailable))
                            .on_hover_text(reason);
                        if ui.small_button("🔄").clicked() {
                            self.check_health();
                        }
                    }
                    ApiStatus::Offline => {
                        ui.colored_label(egui::Color32::LIGHT_BLUE, format!("📖 {}", t.dictionary_mode));
                    }
                }

                if let Some(session) = &self.session {
                    let identity = session.identity();
                    let who = if identity.is_ephemeral() {
                        t.history_not_saved_note.to_string()
                    } else {
                        format!("👤 {}", identity.id)
                    };
                    ui.separator();
                    ui.label(who);
                }
            });
            ui.add_space(5.0);
        });
    }

    fn render_notice_panel(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.session.as_ref().and_then(|s| s.notice()) else {
            return;
        };
        let message = notice.message.clone();

        egui::TopBottomPanel::bottom("notice_panel").show(ctx, |ui| {
            ui.add_space(5.0);
            ui.colored_label(egui::Color32::from_rgb(220, 80, 80), format!("⚠️ {message}"));
            ui.add_space(5.0);
        });
    }

    fn render_language_selector(&mut self, ui: &mut egui::Ui) {
        // right_to_left - обходим в обратном порядке, чтобы сохранить порядок на экране
        for lang in Language::all().iter().rev() {
            let text = format!("{} {}", lang.flag(), lang.native_name());
            let selected = self.language == *lang;

            if ui.selectable_label(selected, text).clicked() {
                self.set_language(*lang);
            }
        }
        ui.label("🌐");
    }
}
