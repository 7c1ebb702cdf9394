//! HTTP клиент удалённого API переводов

use super::models::{
    HealthResponse, HistoryResponse, RemoteStats, RemoteTranslation, StatsResponse, TranslateRequest,
    TranslateResponse,
};
use super::ApiError;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

/// Сколько символов тела ответа сохранять в ошибке
const BODY_EXCERPT_CHARS: usize = 200;

/// Клиент API (`/health`, `/translate`, `/history`, `/stats`)
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Создать клиент для базового адреса вида `http://host:5000/api`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        // Таймаут не задаём - используется поведение транспорта по умолчанию
        let http = Client::builder().build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Проверка живости: `GET /health`
    ///
    /// Тело разбирается до проверки статуса, чтобы сохранить `message` сервера.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.endpoint(&["health"])?;
        tracing::debug!(%url, "health probe");

        let response = self.http.get(url).header("Accept", "application/json").send().await?;
        let status = response.status();
        let text = response.text().await?;

        let health: HealthResponse = serde_json::from_str(&text).map_err(|_| {
            ApiError::Malformed(format!(
                "сервер вернул не JSON: {}",
                excerpt(&text)
            ))
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: health.message.unwrap_or_else(|| excerpt(&text)),
            });
        }

        Ok(health)
    }

    /// Перевод: `POST /translate`
    pub async fn translate(&self, request: &TranslateRequest<'_>) -> Result<TranslateResponse, ApiError> {
        let url = self.endpoint(&["translate"])?;
        tracing::debug!(%url, direction = request.direction.api_name(), user_id = request.user_id, "translate request");

        let response = self
            .http
            .post(url)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }

    /// История пользователя: `GET /history/{user_id}?limit=N`
    pub async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<RemoteTranslation>, ApiError> {
        let mut url = self.endpoint(&["history", user_id])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        tracing::debug!(%url, "history request");

        let response = self.http.get(url).header("Accept", "application/json").send().await?;
        let body: HistoryResponse = read_json(response).await?;
        if !body.success {
            return Err(ApiError::Rejected);
        }
        Ok(body.translations)
    }

    /// Статистика пользователя: `GET /stats/{user_id}`
    pub async fn stats(&self, user_id: &str) -> Result<RemoteStats, ApiError> {
        let url = self.endpoint(&["stats", user_id])?;
        tracing::debug!(%url, "stats request");

        let response = self.http.get(url).header("Accept", "application/json").send().await?;
        let body: StatsResponse = read_json(response).await?;
        if !body.success {
            return Err(ApiError::Rejected);
        }
        Ok(body.stats)
    }
}

/// Проверить статус и разобрать JSON
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "api returned error status");
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: excerpt(&text),
        });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn excerpt(text: &str) -> String {
    crate::utils::truncate_string(text.trim(), BODY_EXCERPT_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let client = ApiClient::new("http://127.0.0.1:5000/api").unwrap();
        assert_eq!(
            client.endpoint(&["health"]).unwrap().as_str(),
            "http://127.0.0.1:5000/api/health"
        );

        let client = ApiClient::new("http://127.0.0.1:5000/api/").unwrap();
        assert_eq!(
            client.endpoint(&["history", "5159491775"]).unwrap().as_str(),
            "http://127.0.0.1:5000/api/history/5159491775"
        );
    }

    #[test]
    fn test_endpoint_escapes_user_id() {
        let client = ApiClient::new("http://localhost/api").unwrap();
        let url = client.endpoint(&["history", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/history/a%2Fb%20c");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(ApiClient::new("not a url"), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(ApiClient::new("mailto:someone@example.com"), Err(ApiError::InvalidUrl(_))));
    }
}
