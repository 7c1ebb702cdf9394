//! Состояние приложения: пользователь, направление, ввод, результат, история
//!
//! GUI и CLI управляют сессией только через методы. Сеть сюда не попадает:
//! `begin_translation` выдаёт запрос, а результат возвращается в
//! `complete_translation`.

use crate::direction::{DirectionLabels, TranslationDirection};
use crate::history::{self, History, HistoryPage, TranslationEntry, DEFAULT_PAGE_SIZE};
use crate::i18n::{t, Language};
use crate::identity::UserIdentity;
use crate::translator::{TranslateError, TranslationOutcome};
use std::time::{Duration, Instant};

/// Сколько живёт уведомление об ошибке
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Активный экран
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Translate,
    History,
}

/// Как показывать карточку результата
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Placeholder,
    Pending,
    Success,
    NotFound,
    Error,
}

/// Содержимое карточек результата и объяснения
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDisplay {
    pub translation: String,
    pub explanation: String,
    pub tone: Tone,
}

/// Всплывающее сообщение, исчезает само
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

/// Запрос на перевод, выданный сессией
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub direction: TranslationDirection,
}

#[derive(Debug)]
pub struct Session {
    identity: UserIdentity,
    direction: TranslationDirection,
    screen: Screen,
    input: String,
    display: ResultDisplay,
    history: History,
    /// С 1
    current_page: usize,
    page_size: usize,
    pending: Option<TranslationRequest>,
    /// Записи, добавленные после последней загрузки истории
    unsynced: usize,
    notice: Option<Notice>,
    language: Language,
}

impl Session {
    /// Временный пользователь всегда получает пустую историю без хранилища
    pub fn new(identity: UserIdentity, history: History, page_size: usize, language: Language) -> Self {
        let history = if identity.is_ephemeral() {
            History::ephemeral()
        } else {
            history
        };
        let mut session = Self {
            identity,
            direction: TranslationDirection::default(),
            screen: Screen::default(),
            input: String::new(),
            display: ResultDisplay {
                translation: String::new(),
                explanation: String::new(),
                tone: Tone::Placeholder,
            },
            history,
            current_page: 1,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            pending: None,
            unsynced: 0,
            notice: None,
            language,
        };
        session.display = session.placeholder_display();
        session
    }

    // === Доступ к состоянию ===

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn direction(&self) -> TranslationDirection {
        self.direction
    }

    pub fn labels(&self) -> DirectionLabels {
        self.direction.labels()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Поле ввода для виджета
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn display(&self) -> &ResultDisplay {
        &self.display
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if self.display.tone == Tone::Placeholder {
            self.display = self.placeholder_display();
        }
    }

    // === Направление ===

    /// Сменить направление: ввод очищается, карточки возвращаются к заглушкам
    pub fn toggle_direction(&mut self) {
        self.direction.toggle();
        self.input.clear();
        self.display = self.placeholder_display();
        tracing::debug!(direction = %self.direction, "direction toggled");
    }

    fn placeholder_display(&self) -> ResultDisplay {
        let tr = t(self.language);
        let note = if self.history.is_recording() {
            tr.history_saved_note
        } else {
            tr.history_not_saved_note
        };
        ResultDisplay {
            translation: tr.result_placeholder.to_string(),
            explanation: format!("{}\n\n{}", tr.explanation_placeholder, note),
            tone: Tone::Placeholder,
        }
    }

    // === Перевод ===

    /// Начать перевод текущего ввода
    ///
    /// Пустой ввод показывает подсказку и ничего не возвращает.
    pub fn begin_translation(&mut self) -> Option<TranslationRequest> {
        let tr = t(self.language);
        let text = self.input.trim();
        if text.is_empty() {
            self.display = ResultDisplay {
                translation: tr.empty_input.to_string(),
                explanation: tr.empty_input_hint.to_string(),
                tone: Tone::Placeholder,
            };
            return None;
        }

        let request = TranslationRequest {
            text: text.to_string(),
            direction: self.direction,
        };
        self.display = ResultDisplay {
            translation: tr.translating.to_string(),
            explanation: tr.processing.to_string(),
            tone: Tone::Pending,
        };
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Применить результат перевода
    ///
    /// Последний пришедший ответ перезаписывает карточки, даже если был
    /// выдан более поздний запрос.
    pub fn complete_translation(
        &mut self,
        request: &TranslationRequest,
        result: Result<TranslationOutcome, TranslateError>,
        now: Instant,
    ) {
        if self.pending.as_ref() == Some(request) {
            self.pending = None;
        }
        let tr = t(self.language);

        match result {
            Ok(TranslationOutcome::Found(found)) => {
                let mut explanation = found.explanation.clone();
                if self.history.is_recording() {
                    if !found.translation.trim().is_empty() {
                        self.history.append(TranslationEntry::new(
                            request.text.clone(),
                            found.translation.clone(),
                            found.explanation,
                            request.direction,
                        ));
                        self.unsynced += 1;
                        self.clamp_page();
                    }
                } else {
                    if !explanation.is_empty() {
                        explanation.push_str("\n\n");
                    }
                    explanation.push_str(tr.not_saved_suffix);
                }

                self.display = ResultDisplay {
                    translation: found.translation,
                    explanation,
                    tone: Tone::Success,
                };
            }
            Ok(TranslationOutcome::NotFound) => {
                self.display = ResultDisplay {
                    translation: tr.not_found.to_string(),
                    explanation: tr.not_found_hint.to_string(),
                    tone: Tone::NotFound,
                };
            }
            Err(e) => {
                tracing::warn!(text = %request.text, error = %e, "translation failed");
                let message = match &e {
                    TranslateError::ServiceUnavailable(_) => tr.service_unavailable.to_string(),
                    other => format!("{}: {}", tr.translation_failed, other),
                };
                self.display = ResultDisplay {
                    translation: tr.error_title.to_string(),
                    explanation: message.clone(),
                    tone: Tone::Error,
                };
                self.set_notice(message, now);
            }
        }
    }

    // === Уведомления ===

    pub fn set_notice(&mut self, message: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            message: message.into(),
            expires_at: now + NOTICE_TTL,
        });
    }

    /// Убрать просроченное уведомление. Возвращает true, если оно исчезло.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        match &self.notice {
            Some(notice) if notice.expires_at <= now => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    // === Экраны ===

    pub fn show_translate(&mut self) {
        self.screen = Screen::Translate;
    }

    pub fn show_history(&mut self) {
        self.screen = Screen::History;
        self.clamp_page();
    }

    // === История ===

    pub fn total_pages(&self) -> usize {
        self.history.total_pages(self.page_size)
    }

    /// Текущая страница истории
    pub fn history_page(&self) -> HistoryPage<'_> {
        self.history.page(self.current_page, self.page_size)
    }

    /// Выбрать страницу (номер приводится к допустимому диапазону)
    pub fn select_page(&mut self, page: usize) {
        self.current_page = page;
        self.clamp_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.page_size = page_size;
        self.clamp_page();
    }

    /// Подменить историю (после загрузки)
    ///
    /// Переводы, сделанные пока шла загрузка, сохраняются в новой истории.
    pub fn replace_history(&mut self, mut history: History) {
        if self.identity.is_ephemeral() {
            return;
        }
        let unsynced = self.unsynced.min(self.history.len());
        history.merge_newer(&self.history.entries()[..unsynced]);
        self.history = history;
        self.unsynced = 0;
        self.clamp_page();
        if self.display.tone == Tone::Placeholder {
            self.display = self.placeholder_display();
        }
    }

    /// Очистить локальную историю. Серверную очистить нельзя: показывается уведомление.
    pub fn clear_history(&mut self, now: Instant) -> bool {
        if !self.history.is_clearable() {
            let tr = t(self.language);
            let message = if self.history.is_recording() {
                tr.clear_history_unsupported
            } else {
                tr.history_unavailable
            };
            self.set_notice(message, now);
            return false;
        }
        self.history.clear();
        self.unsynced = 0;
        self.current_page = 1;
        true
    }

    /// Перевести снова запись `index` текущей страницы
    ///
    /// Текст берётся по текущему направлению, а не по направлению записи.
    pub fn replay(&mut self, index: usize) -> Option<TranslationRequest> {
        let text = self
            .history_page()
            .items
            .get(index)
            .map(|entry| history::replay(entry, self.direction).to_string())?;

        self.input = text;
        self.screen = Screen::Translate;
        self.begin_translation()
    }

    fn clamp_page(&mut self) {
        let max = self.total_pages().max(1);
        self.current_page = self.current_page.clamp(1, max);
    }
}
