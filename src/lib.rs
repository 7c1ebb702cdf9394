//! Slanglit - переводчик молодёжного сленга на русский и обратно
//!
//! Общая библиотека для GUI и CLI версий.
//!
//! # Модули
//! - `identity` - определение пользователя (Telegram ID)
//! - `translator` - стратегии перевода (удалённый API, встроенный словарь)
//! - `api` - HTTP клиент сервера переводов
//! - `dictionary` - встроенный словарь сленга
//! - `direction` - направление перевода и подписи интерфейса
//! - `history` - история переводов и постраничный просмотр
//! - `session` - состояние приложения
//! - `view` - навигация и разметка истории
//! - `backend` - сборка сервисов по настройкам
//! - `storage` - локальное хранилище ключ-значение
//! - `config` - настройки
//! - `logging` - инициализация логов
//! - `i18n` - интернационализация (русский, английский)

pub mod api;
pub mod backend;
pub mod config;
pub mod dictionary;
pub mod direction;
pub mod events;
pub mod history;
pub mod i18n;
pub mod identity;
pub mod logging;
pub mod session;
pub mod storage;
pub mod translator;
pub mod utils;
pub mod view;
