//! Настройки приложения (`config.toml` + переменные окружения)

use crate::history::{DEFAULT_PAGE_SIZE, MAX_HISTORY_ENTRIES};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Адрес API по умолчанию (Flask сервер бота)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";
/// Переопределение адреса API
pub const API_URL_ENV: &str = "SLANGLIT_API_URL";
/// Переопределение режима перевода
pub const MODE_ENV: &str = "SLANGLIT_MODE";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("ошибка в {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("неизвестный режим перевода: {0}")]
    UnknownMode(String),
}

/// Стратегия перевода
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorMode {
    /// Удалённый API
    #[default]
    Remote,
    /// Встроенный словарь
    Dictionary,
}

impl FromStr for TranslatorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" | "api" => Ok(Self::Remote),
            "dictionary" | "local" | "offline" => Ok(Self::Dictionary),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: TranslatorMode,
    pub api_base_url: String,
    /// Записей на странице истории
    pub page_size: usize,
    /// Сколько записей запрашивать у сервера
    pub history_limit: usize,
    /// Заполнить пустую локальную историю примерами
    pub seed_history: bool,
    pub language: Language,
    /// Папка хранилища (по умолчанию - папка данных ОС)
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: TranslatorMode::Remote,
            api_base_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            history_limit: MAX_HISTORY_ENTRIES,
            seed_history: false,
            language: Language::default(),
            data_dir: None,
        }
    }
}

impl Settings {
    /// Загрузить настройки из стандартного места и применить переменные окружения
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Self::load_from(&config_file_path())?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Загрузить настройки из файла (нет файла - значения по умолчанию)
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut settings: Settings = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.normalize();
        Ok(settings)
    }

    /// Применить переопределения из окружения
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = var(MODE_ENV) {
            match raw.parse::<TranslatorMode>() {
                Ok(mode) => self.mode = mode,
                Err(e) => tracing::warn!(error = %e, "ignoring {MODE_ENV}"),
            }
        }
    }

    /// Папка хранилища
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(crate::storage::default_data_dir)
    }

    fn normalize(&mut self) {
        if self.page_size == 0 {
            tracing::warn!("page_size = 0 is not allowed, using default");
            self.page_size = DEFAULT_PAGE_SIZE;
        }
    }
}

/// Путь к файлу настроек
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slanglit")
        .join(CONFIG_FILE)
}
