//! Состояние приложения

use slanglit::api::ApiError;
use slanglit::backend::Backend;
use slanglit::config::{Settings, TranslatorMode};
use slanglit::events::AppEvent;
use slanglit::history::HistoryStats;
use slanglit::i18n::{t, Language, Translations};
use slanglit::identity::Resolution;
use slanglit::session::Session;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Ошибка запуска GUI
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("не удалось запустить tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Состояние сервера переводов
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Checking,
    Available,
    Unavailable(String),
    /// Режим словаря, сеть не используется
    Offline,
}

/// Главная структура приложения
pub struct App {
    // Язык интерфейса
    pub language: Language,

    pub backend: Arc<Backend>,

    /// `None`, пока пользователь не определён
    pub session: Option<Session>,

    // === Ввод Telegram ID ===
    pub identity_input: String,
    pub identity_error: Option<String>,

    // === Статус ===
    pub api_status: ApiStatus,
    pub stats: Option<HistoryStats>,
    pub history_loading: bool,

    // === Runtime ===
    pub runtime: tokio::runtime::Runtime,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    pub event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(settings: Settings, bridge_id: Option<String>) -> Result<Self, StartupError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let language = settings.language;
        let api_status = match settings.mode {
            TranslatorMode::Remote => ApiStatus::Checking,
            TranslatorMode::Dictionary => ApiStatus::Offline,
        };
        let backend = Arc::new(Backend::from_settings(settings)?);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            language,
            backend,
            session: None,
            identity_input: String::new(),
            identity_error: None,
            api_status,
            stats: None,
            history_loading: false,
            runtime,
            event_tx,
            event_rx,
        };

        app.check_health();

        let resolution = app.backend.resolver().resolve(bridge_id.as_deref());
        if let Resolution::Resolved(identity) = resolution {
            app.start_session(identity);
        }

        Ok(app)
    }

    /// Получить переводы для текущего языка
    pub fn t(&self) -> &'static Translations {
        t(self.language)
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Some(session) = &mut self.session {
            session.set_language(language);
        }
    }
}
