//! Сборка сервисов по настройкам: хранилище, переводчик, источник истории

use crate::api::{ApiClient, ApiError};
use crate::config::{Settings, TranslatorMode};
use crate::history::{History, HistorySource, HistoryStats};
use crate::identity::{IdentityResolver, UserIdentity};
use crate::session::TranslationRequest;
use crate::storage::{FileStorage, Storage};
use crate::translator::{
    DictionaryTranslator, RemoteTranslator, TranslateError, TranslationOutcome, Translator,
};
use std::sync::Arc;

/// Общие сервисы приложения (GUI держит их в `Arc` и отдаёт задачам)
pub struct Backend {
    settings: Settings,
    storage: Arc<dyn Storage>,
    translator: Arc<dyn Translator>,
    /// Есть только в режиме удалённого API
    remote: Option<Arc<RemoteTranslator>>,
}

impl Backend {
    /// Хранилище в папке данных из настроек
    pub fn from_settings(settings: Settings) -> Result<Self, ApiError> {
        let storage = Arc::new(FileStorage::open(&settings.data_dir()));
        tracing::debug!(path = %storage.path().display(), "storage opened");
        Self::with_storage(settings, storage)
    }

    pub fn with_storage(settings: Settings, storage: Arc<dyn Storage>) -> Result<Self, ApiError> {
        let remote = match settings.mode {
            TranslatorMode::Remote => Some(Arc::new(RemoteTranslator::new(ApiClient::new(
                &settings.api_base_url,
            )?))),
            TranslatorMode::Dictionary => None,
        };
        let translator: Arc<dyn Translator> = match &remote {
            Some(remote) => remote.clone(),
            None => Arc::new(DictionaryTranslator),
        };
        tracing::info!(translator = translator.name(), "backend ready");

        Ok(Self {
            settings,
            storage,
            translator,
            remote,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    pub fn remote(&self) -> Option<&Arc<RemoteTranslator>> {
        self.remote.as_ref()
    }

    pub fn resolver(&self) -> IdentityResolver<'_> {
        IdentityResolver::new(self.storage.as_ref())
    }

    /// Проверка API (в режиме словаря всегда успешна)
    pub async fn check_health(&self) -> Result<(), TranslateError> {
        match &self.remote {
            Some(remote) => remote.probe().await,
            None => Ok(()),
        }
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
        identity: &UserIdentity,
    ) -> Result<TranslationOutcome, TranslateError> {
        self.translator
            .translate(&request.text, request.direction, identity)
            .await
    }

    pub fn history_source(&self) -> HistorySource<'_> {
        match &self.remote {
            Some(remote) => HistorySource::Remote {
                client: remote.client(),
                limit: self.settings.history_limit,
            },
            None => HistorySource::Local {
                storage: self.storage.clone(),
                seed: self.settings.seed_history,
            },
        }
    }

    pub async fn load_history(&self, identity: &UserIdentity) -> History {
        History::load(identity, self.history_source()).await
    }

    /// История, доступная сразу без сети (локальная или временная)
    ///
    /// `None` значит, что историю нужно загрузить с сервера.
    pub fn preload_history(&self, identity: &UserIdentity) -> Option<History> {
        if identity.is_ephemeral() {
            return Some(History::ephemeral());
        }
        match self.history_source() {
            HistorySource::Local { storage, seed } => Some(History::load_local(storage, seed)),
            HistorySource::Remote { .. } => None,
        }
    }

    /// Статистика: с сервера или по локальной истории
    pub async fn stats(&self, identity: &UserIdentity, history: &History) -> Result<HistoryStats, ApiError> {
        if identity.is_ephemeral() {
            return Ok(HistoryStats::default());
        }
        match &self.remote {
            Some(remote) => Ok(remote.client().stats(&identity.id).await?.into()),
            None => Ok(history.stats()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::TranslationDirection;
    use crate::history::HistoryBackend;
    use crate::identity::{IdentitySource, Resolution};
    use crate::storage::{MemoryStorage, HISTORY_KEY};

    fn dictionary_backend(storage: Arc<MemoryStorage>) -> Backend {
        let settings = Settings {
            mode: TranslatorMode::Dictionary,
            ..Settings::default()
        };
        Backend::with_storage(settings, storage).unwrap()
    }

    #[test]
    fn test_mode_selects_translator() {
        let backend = dictionary_backend(Arc::new(MemoryStorage::new()));
        assert_eq!(backend.translator().name(), "dictionary");
        assert!(backend.remote().is_none());

        let backend = Backend::with_storage(Settings::default(), Arc::new(MemoryStorage::new())).unwrap();
        assert_eq!(backend.translator().name(), "remote");
        assert!(backend.remote().is_some());
    }

    #[test]
    fn test_invalid_api_url_is_error() {
        let settings = Settings {
            api_base_url: "not a url".into(),
            ..Settings::default()
        };
        assert!(matches!(
            Backend::with_storage(settings, Arc::new(MemoryStorage::new())),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_dictionary_backend_flow() {
        let storage = Arc::new(MemoryStorage::new());
        let backend = dictionary_backend(storage.clone());
        assert!(backend.check_health().await.is_ok());

        let identity = backend.resolver().submit("5159491775").unwrap();
        assert_eq!(
            backend.resolver().resolve(None),
            Resolution::Resolved(UserIdentity::new("5159491775", IdentitySource::Persisted))
        );

        let mut history = backend.load_history(&identity).await;
        assert!(matches!(history.backend(), HistoryBackend::Local(_)));

        let request = TranslationRequest {
            text: "краш".into(),
            direction: TranslationDirection::ToFormal,
        };
        let outcome = backend.translate(&request, &identity).await.unwrap();
        assert!(matches!(outcome, TranslationOutcome::Found(_)));

        history.append(crate::history::TranslationEntry::new(
            "краш",
            "симпатия",
            "",
            TranslationDirection::ToFormal,
        ));
        let stats = backend.stats(&identity, &history).await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.to_formal, 1);

        let reloaded = backend.load_history(&identity).await;
        assert_eq!(reloaded.len(), 1);
    }

    #[tokio::test]
    async fn test_ephemeral_stats_are_empty() {
        let backend = dictionary_backend(Arc::new(MemoryStorage::new()));
        let stats = backend
            .stats(&UserIdentity::ephemeral(), &History::ephemeral())
            .await
            .unwrap();
        assert_eq!(stats, HistoryStats::default());
    }

    #[test]
    fn test_preload_history() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(HISTORY_KEY, r#"[{"original":"краш","translation":"симпатия","explanation":""}]"#).unwrap();
        let user = UserIdentity::new("5159491775", IdentitySource::Persisted);

        let backend = dictionary_backend(storage.clone());
        let local = backend.preload_history(&user).unwrap();
        assert!(local.is_clearable());
        assert_eq!(local.len(), 1);
        assert!(!backend.preload_history(&UserIdentity::ephemeral()).unwrap().is_recording());

        let remote = Backend::with_storage(Settings::default(), storage).unwrap();
        assert!(remote.preload_history(&user).is_none());
        assert!(!remote.preload_history(&UserIdentity::ephemeral()).unwrap().is_recording());
    }
}

