//! Действия приложения

use super::state::{ApiStatus, App};
use slanglit::events::AppEvent;
use slanglit::history::{History, HistoryBackend};
use slanglit::identity::UserIdentity;
use slanglit::session::{Session, TranslationRequest};
use std::time::Instant;

impl App {
    // === Пользователь ===

    /// Принять введённый Telegram ID
    pub fn submit_identity(&mut self) {
        match self.backend.resolver().submit(&self.identity_input) {
            Ok(identity) => {
                self.identity_error = None;
                self.identity_input.clear();
                self.start_session(identity);
            }
            Err(e) => self.identity_error = Some(e.to_string()),
        }
    }

    /// Продолжить без истории
    pub fn skip_identity(&mut self) {
        let identity = self.backend.resolver().opt_out();
        self.identity_error = None;
        self.start_session(identity);
    }

    /// Забыть пользователя и вернуться к вводу id
    pub fn forget_identity(&mut self) {
        self.backend.resolver().forget();
        self.session = None;
        self.stats = None;
        self.identity_input.clear();
        self.identity_error = None;
    }

    pub fn start_session(&mut self, identity: UserIdentity) {
        let preloaded = self.backend.preload_history(&identity);
        let needs_load = preloaded.is_none();
        // Серверная история приходит позже, до этого переводы копятся в заглушке
        let history = preloaded.unwrap_or_else(|| History::new(HistoryBackend::Remote));
        tracing::info!(user_id = %identity.id, source = ?identity.source, "session started");

        let page_size = self.backend.settings().page_size;
        self.session = Some(Session::new(identity, history, page_size, self.language));
        self.stats = None;
        if needs_load {
            self.load_history();
        }
    }

    // === Сеть ===

    /// Проверка API в фоне
    pub fn check_health(&mut self) {
        if self.api_status == ApiStatus::Offline {
            return;
        }
        self.api_status = ApiStatus::Checking;

        let backend = self.backend.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.check_health().await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::HealthChecked(result));
        });
    }

    /// Перевести текущий ввод
    pub fn translate(&mut self) {
        let Some(session) = &mut self.session else { return };
        if let Some(request) = session.begin_translation() {
            let identity = session.identity().clone();
            self.spawn_translation(request, identity);
        }
    }

    /// Повторить перевод записи истории
    pub fn replay(&mut self, index: usize) {
        let Some(session) = &mut self.session else { return };
        if let Some(request) = session.replay(index) {
            let identity = session.identity().clone();
            self.spawn_translation(request, identity);
        }
    }

    fn spawn_translation(&self, request: TranslationRequest, identity: UserIdentity) {
        let backend = self.backend.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.translate(&request, &identity).await;
            let _ = tx.send(AppEvent::TranslationFinished(request, result));
        });
    }

    /// Загрузить историю текущего пользователя
    pub fn load_history(&mut self) {
        let Some(session) = &self.session else { return };
        if !session.history().is_recording() {
            return;
        }
        let identity = session.identity().clone();
        self.history_loading = true;

        let backend = self.backend.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let history = backend.load_history(&identity).await;
            let _ = tx.send(AppEvent::HistoryLoaded(history));
        });
    }

    /// Загрузить статистику
    pub fn load_stats(&mut self) {
        let Some(session) = &self.session else { return };
        let identity = session.identity().clone();
        let history = session.history().clone();

        let backend = self.backend.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = backend
                .stats(&identity, &history)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::StatsLoaded(result));
        });
    }

    pub fn clear_history(&mut self) {
        if let Some(session) = &mut self.session {
            if session.clear_history(Instant::now()) {
                self.stats = None;
            }
        }
    }
}
