//! Удалённый API переводов и истории

mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{HealthResponse, RemoteStats, RemoteTranslation, TranslateRequest, TranslateResponse};

use thiserror::Error;

/// Ошибка обращения к API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("некорректный адрес API: {0}")]
    InvalidUrl(String),
    #[error("сетевая ошибка: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("ошибка сервера {status}: {body}")]
    Status { status: u16, body: String },
    #[error("некорректный ответ сервера: {0}")]
    Malformed(String),
    #[error("сервер отклонил запрос")]
    Rejected,
}
