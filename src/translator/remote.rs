//! Перевод через удалённый API

use super::{TranslateError, Translation, TranslationOutcome, Translator};
use crate::api::{ApiClient, ApiError, TranslateRequest};
use crate::direction::TranslationDirection;
use crate::identity::UserIdentity;
use async_trait::async_trait;
use std::sync::RwLock;

/// Состояние последней проверки живости
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Проверка ещё не выполнялась
    Unknown,
    Available,
    Unavailable(String),
}

pub struct RemoteTranslator {
    client: ApiClient,
    availability: RwLock<Availability>,
}

impl RemoteTranslator {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            availability: RwLock::new(Availability::Unknown),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn availability(&self) -> Availability {
        self.availability
            .read()
            .map(|a| a.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn set_availability(&self, value: Availability) {
        match self.availability.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    /// Проверить `/health` и запомнить результат
    ///
    /// Сервер считается доступным только при 2xx, JSON теле и `database == "connected"`.
    pub async fn probe(&self) -> Result<(), TranslateError> {
        let result = match self.client.health().await {
            Ok(health) if health.is_connected() => Ok(()),
            Ok(health) => Err(health
                .message
                .unwrap_or_else(|| "API не доступен".to_string())),
            Err(ApiError::Status { status, body }) => Err(format!("HTTP {status}: {body}")),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => {
                tracing::info!(url = %self.client.base_url(), "translation API is available");
                self.set_availability(Availability::Available);
                Ok(())
            }
            Err(reason) => {
                tracing::warn!(url = %self.client.base_url(), %reason, "translation API is unavailable");
                self.set_availability(Availability::Unavailable(reason.clone()));
                Err(TranslateError::ServiceUnavailable(reason))
            }
        }
    }
}

#[async_trait]
impl Translator for RemoteTranslator {
    async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
        identity: &UserIdentity,
    ) -> Result<TranslationOutcome, TranslateError> {
        match self.availability() {
            Availability::Available => {}
            Availability::Unknown => {
                return Err(TranslateError::ServiceUnavailable("проверка API не выполнена".to_string()));
            }
            Availability::Unavailable(reason) => return Err(TranslateError::ServiceUnavailable(reason)),
        }

        let request = TranslateRequest {
            text: text.trim(),
            direction,
            user_id: identity.api_user_id(),
        };
        let response = self.client.translate(&request).await?;

        // Пустой перевод от сервера показываем как "не найдено"
        if response.translated_text.trim().is_empty() {
            return Ok(TranslationOutcome::NotFound);
        }

        Ok(TranslationOutcome::Found(Translation {
            translation: response.translated_text,
            explanation: response.explanation.unwrap_or_default(),
        }))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_translate_before_probe_is_unavailable() {
        let client = ApiClient::new("http://127.0.0.1:9/api").unwrap();
        let tr = RemoteTranslator::new(client);
        assert_eq!(tr.availability(), Availability::Unknown);

        let err = tr
            .translate("краш", TranslationDirection::ToFormal, &UserIdentity::ephemeral())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::ServiceUnavailable(_)));
    }
}
