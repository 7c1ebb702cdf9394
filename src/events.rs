//! События фоновых задач для GUI

use crate::history::{History, HistoryStats};
use crate::session::TranslationRequest;
use crate::translator::{TranslateError, TranslationOutcome};

/// Результаты асинхронной работы, которые GUI забирает каждый кадр
#[derive(Debug)]
pub enum AppEvent {
    /// Проверка API завершена (ошибка - причина недоступности)
    HealthChecked(Result<(), String>),
    /// Перевод завершён (запрос, результат)
    TranslationFinished(TranslationRequest, Result<TranslationOutcome, TranslateError>),
    /// История загружена
    HistoryLoaded(History),
    /// Статистика получена
    StatsLoaded(Result<HistoryStats, String>),
}
