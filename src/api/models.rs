//! Модели запросов и ответов API

use crate::direction::TranslationDirection;
use serde::{Deserialize, Serialize};

/// Значение поля `database` у живого сервера
pub const DATABASE_CONNECTED: &str = "connected";

/// Ответ `GET /api/health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub gigachat: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthResponse {
    pub fn is_connected(&self) -> bool {
        self.database.as_deref() == Some(DATABASE_CONNECTED)
    }
}

/// Тело `POST /api/translate`
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest<'a> {
    pub text: &'a str,
    pub direction: TranslationDirection,
    pub user_id: &'a str,
}

/// Ответ `POST /api/translate`
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Запись истории на сервере
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTranslation {
    #[serde(default)]
    pub direction: TranslationDirection,
    pub informal_text: String,
    pub formal_text: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Ответ `GET /api/history/{user_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub translations: Vec<RemoteTranslation>,
}

/// Статистика пользователя на сервере
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteStats {
    #[serde(default)]
    pub total_translations: usize,
    #[serde(default)]
    pub to_formal_count: usize,
    #[serde(default)]
    pub to_informal_count: usize,
    #[serde(default)]
    pub last_activity: Option<String>,
}

/// Ответ `GET /api/stats/{user_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(default)]
    pub stats: RemoteStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_connected() {
        let health: HealthResponse =
            serde_json::from_str(r#"{"status":"ok","database":"connected","gigachat":"connected","message":"API и БД работают"}"#)
                .unwrap();
        assert!(health.is_connected());

        let health: HealthResponse = serde_json::from_str(r#"{"database":"error","message":"Ошибка БД"}"#).unwrap();
        assert!(!health.is_connected());
        assert_eq!(health.message.as_deref(), Some("Ошибка БД"));
    }

    #[test]
    fn test_translate_request_wire_format() {
        let req = TranslateRequest {
            text: "краш",
            direction: TranslationDirection::ToFormal,
            user_id: "unknown_user",
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["direction"], "to_formal");
        assert_eq!(value["user_id"], "unknown_user");
        assert_eq!(value["text"], "краш");
    }

    #[test]
    fn test_history_response_with_null_explanation() {
        let json = r#"{
            "success": true,
            "user_id": "5159491775",
            "translations": [
                {"id": 1, "informal_text": "краш", "formal_text": "симпатия",
                 "explanation": null, "direction": "to_formal", "created_at": "2024-05-01 10:00:00"}
            ],
            "total": 1
        }"#;
        let resp: HistoryResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.translations.len(), 1);
        assert_eq!(resp.translations[0].explanation, None);
    }

    #[test]
    fn test_missing_direction_defaults_to_formal() {
        let t: RemoteTranslation =
            serde_json::from_str(r#"{"informal_text":"изи","formal_text":"легко"}"#).unwrap();
        assert_eq!(t.direction, TranslationDirection::ToFormal);
    }
}
