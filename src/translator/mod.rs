//! Стратегии перевода: удалённый API или встроенный словарь

mod local;
mod remote;

pub use local::DictionaryTranslator;
pub use remote::RemoteTranslator;

use crate::api::ApiError;
use crate::direction::TranslationDirection;
use crate::identity::UserIdentity;
use async_trait::async_trait;
use thiserror::Error;

/// Успешный перевод
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub translation: String,
    pub explanation: String,
}

/// Исход перевода. "Не найдено" - нормальный результат, а не ошибка.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Found(Translation),
    NotFound,
}

/// Ошибка перевода
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("сервер переводов недоступен: {0}")]
    ServiceUnavailable(String),
    #[error("запрос не выполнен: {0}")]
    RequestFailed(String),
    #[error("некорректный ответ сервера: {0}")]
    MalformedResponse(String),
}

impl From<ApiError> for TranslateError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Malformed(msg) => Self::MalformedResponse(msg),
            ApiError::Transport(e) if e.is_decode() => Self::MalformedResponse(e.to_string()),
            ApiError::InvalidUrl(url) => Self::ServiceUnavailable(format!("некорректный адрес API: {url}")),
            other => Self::RequestFailed(other.to_string()),
        }
    }
}

/// Переводчик
#[async_trait]
pub trait Translator: Send + Sync {
    /// Перевести текст в заданном направлении
    async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
        identity: &UserIdentity,
    ) -> Result<TranslationOutcome, TranslateError>;

    /// Название для логов и статуса
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_mapping() {
        let e: TranslateError = ApiError::Malformed("bad".into()).into();
        assert!(matches!(e, TranslateError::MalformedResponse(_)));

        let e: TranslateError = ApiError::Status { status: 500, body: "boom".into() }.into();
        match e {
            TranslateError::RequestFailed(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected {other:?}"),
        }

        let e: TranslateError = ApiError::Rejected.into();
        assert!(matches!(e, TranslateError::RequestFailed(_)));
    }
}
