//! Обработка событий фоновых задач

use super::state::{ApiStatus, App};
use slanglit::events::AppEvent;
use std::time::Instant;

impl App {
    /// Обработать все ожидающие события
    pub fn process_events(&mut self) {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }

        for event in events {
            self.handle_event(event);
        }

        if let Some(session) = &mut self.session {
            session.expire_notice(Instant::now());
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::HealthChecked(result) => self.on_health_checked(result),
            AppEvent::TranslationFinished(request, result) => {
                if let Some(session) = &mut self.session {
                    session.complete_translation(&request, result, Instant::now());
                }
            }
            AppEvent::HistoryLoaded(history) => {
                self.history_loading = false;
                let message = self.t().history_load_failed;
                if let Some(session) = &mut self.session {
                    if history.load_error().is_some() {
                        session.set_notice(message, Instant::now());
                    }
                    session.replace_history(history);
                }
            }
            AppEvent::StatsLoaded(result) => match result {
                Ok(stats) => self.stats = Some(stats),
                Err(e) => tracing::warn!(error = %e, "failed to load stats"),
            },
        }
    }

    fn on_health_checked(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.api_status = ApiStatus::Available,
            Err(reason) => {
                let message = self.t().service_unavailable;
                if let Some(session) = &mut self.session {
                    session.set_notice(message, Instant::now());
                }
                self.api_status = ApiStatus::Unavailable(reason);
            }
        }
    }
}
