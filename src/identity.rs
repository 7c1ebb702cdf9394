//! Определение пользователя
//!
//! Порядок: id от Telegram-моста -> сохранённый id с меткой "telegram" ->
//! ручной ввод. Пользователь может отказаться от ввода и получить временный
//! id, который никуда не сохраняется и отключает историю.

use crate::storage::{Storage, USER_ID_KEY, USER_SOURCE_KEY};
use crate::utils::current_millis;
use thiserror::Error;

/// Метка источника сохранённого id
pub const BRIDGE_SOURCE_TAG: &str = "telegram";
/// Переменная окружения, через которую хост передаёт id
pub const BRIDGE_ENV_VAR: &str = "SLANGLIT_TELEGRAM_ID";
/// Префикс временных id
pub const EPHEMERAL_PREFIX: &str = "temp_";
/// Что отправляется в API вместо временного id
pub const UNKNOWN_USER: &str = "unknown_user";
/// Префикс устаревших web-id, которые нужно удалить
const LEGACY_WEB_PREFIX: &str = "web_";
/// Минимальная длина Telegram ID
pub const MIN_ID_LEN: usize = 5;

/// Откуда получен id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    RemoteBridge,
    Persisted,
    Interactive,
    Ephemeral,
}

/// Пользователь текущей сессии
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub source: IdentitySource,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, source: IdentitySource) -> Self {
        Self { id: id.into(), source }
    }

    /// Временный пользователь без истории
    pub fn ephemeral() -> Self {
        Self::new(format!("{}{}", EPHEMERAL_PREFIX, current_millis()), IdentitySource::Ephemeral)
    }

    pub fn is_ephemeral(&self) -> bool {
        self.source == IdentitySource::Ephemeral
    }

    /// id для отправки в API (временные id заменяются маркером)
    pub fn api_user_id(&self) -> &str {
        if self.is_ephemeral() {
            UNKNOWN_USER
        } else {
            &self.id
        }
    }
}

/// Ошибка проверки введённого id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Пожалуйста, введите ваш Telegram ID")]
    Empty,
    #[error("Telegram ID должен содержать только цифры (пример: 5159491775)")]
    NotDigits,
    #[error("Telegram ID слишком короткий (минимум {min} цифр)")]
    TooShort { min: usize },
}

/// Результат автоматического определения
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(UserIdentity),
    /// Нужно спросить пользователя
    NeedsInput,
}

/// Проверка введённого вручную id
pub fn validate_user_id(input: &str) -> Result<&str, IdentityError> {
    let id = input.trim();
    if id.is_empty() {
        return Err(IdentityError::Empty);
    }
    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(IdentityError::NotDigits);
    }
    if id.len() < MIN_ID_LEN {
        return Err(IdentityError::TooShort { min: MIN_ID_LEN });
    }
    Ok(id)
}

/// id от хоста через переменную окружения
pub fn bridge_id_from_env() -> Option<String> {
    std::env::var(BRIDGE_ENV_VAR).ok()
}

pub struct IdentityResolver<'a> {
    storage: &'a dyn Storage,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Определить пользователя без участия человека
    pub fn resolve(&self, bridge_id: Option<&str>) -> Resolution {
        // 1. Telegram-мост - источник истины, сразу сохраняем
        if let Some(id) = bridge_id.map(str::trim).filter(|id| !id.is_empty()) {
            tracing::info!(user_id = id, "using bridge-provided user id");
            self.persist(id);
            return Resolution::Resolved(UserIdentity::new(id, IdentitySource::RemoteBridge));
        }

        // 2. Ранее сохранённый Telegram id
        let saved = self.storage.get(USER_ID_KEY);
        let source = self.storage.get(USER_SOURCE_KEY);
        if let Some(id) = &saved {
            if source.as_deref() == Some(BRIDGE_SOURCE_TAG) {
                tracing::info!(user_id = %id, "using persisted user id");
                return Resolution::Resolved(UserIdentity::new(id.clone(), IdentitySource::Persisted));
            }

            // 3. Старый web-id больше не поддерживается
            if id.starts_with(LEGACY_WEB_PREFIX) {
                tracing::info!(user_id = %id, "dropping legacy web id");
                self.forget();
            }
        }

        tracing::debug!("no user id found, interactive input required");
        Resolution::NeedsInput
    }

    /// Принять ручной ввод
    pub fn submit(&self, input: &str) -> Result<UserIdentity, IdentityError> {
        let id = validate_user_id(input)?;
        self.persist(id);
        tracing::info!(user_id = id, "saved interactive user id");
        Ok(UserIdentity::new(id, IdentitySource::Interactive))
    }

    /// Продолжить без id (история не сохраняется)
    pub fn opt_out(&self) -> UserIdentity {
        let identity = UserIdentity::ephemeral();
        tracing::info!(user_id = %identity.id, "continuing with ephemeral id");
        identity
    }

    /// Удалить сохранённый id
    pub fn forget(&self) {
        for key in [USER_ID_KEY, USER_SOURCE_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove persisted identity");
            }
        }
    }

    fn persist(&self, id: &str) {
        let result = self
            .storage
            .set(USER_ID_KEY, id)
            .and_then(|_| self.storage.set(USER_SOURCE_KEY, BRIDGE_SOURCE_TAG));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist user id");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_bridge_id_wins_and_is_persisted() {
        let storage = MemoryStorage::new();
        storage.set(USER_ID_KEY, "99999").unwrap();
        storage.set(USER_SOURCE_KEY, BRIDGE_SOURCE_TAG).unwrap();

        let resolver = IdentityResolver::new(&storage);
        let res = resolver.resolve(Some("5159491775"));
        assert_eq!(
            res,
            Resolution::Resolved(UserIdentity::new("5159491775", IdentitySource::RemoteBridge))
        );
        assert_eq!(storage.get(USER_ID_KEY).as_deref(), Some("5159491775"));
        assert_eq!(storage.get(USER_SOURCE_KEY).as_deref(), Some("telegram"));
    }

    #[test]
    fn test_blank_bridge_id_is_ignored() {
        let storage = MemoryStorage::new();
        let resolver = IdentityResolver::new(&storage);
        assert_eq!(resolver.resolve(Some("   ")), Resolution::NeedsInput);
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn test_persisted_id_requires_telegram_tag() {
        let storage = MemoryStorage::new();
        storage.set(USER_ID_KEY, "123456").unwrap();
        let resolver = IdentityResolver::new(&storage);
        assert_eq!(resolver.resolve(None), Resolution::NeedsInput);

        storage.set(USER_SOURCE_KEY, "telegram").unwrap();
        assert_eq!(
            resolver.resolve(None),
            Resolution::Resolved(UserIdentity::new("123456", IdentitySource::Persisted))
        );
    }

    #[test]
    fn test_legacy_web_id_is_removed() {
        let storage = MemoryStorage::new();
        storage.set(USER_ID_KEY, "web_abc").unwrap();
        storage.set(USER_SOURCE_KEY, "web").unwrap();
        let resolver = IdentityResolver::new(&storage);

        assert_eq!(resolver.resolve(None), Resolution::NeedsInput);
        assert_eq!(storage.get(USER_ID_KEY), None);
        assert_eq!(storage.get(USER_SOURCE_KEY), None);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(validate_user_id(""), Err(IdentityError::Empty));
        assert_eq!(validate_user_id("   "), Err(IdentityError::Empty));
        assert_eq!(validate_user_id("12ab45"), Err(IdentityError::NotDigits));
        assert_eq!(validate_user_id("-12345"), Err(IdentityError::NotDigits));
        assert_eq!(validate_user_id("1234"), Err(IdentityError::TooShort { min: 5 }));
        assert_eq!(validate_user_id(" 12345 "), Ok("12345"));
    }

    #[test]
    fn test_submit_persists_and_resolves_next_time() {
        let storage = MemoryStorage::new();
        let resolver = IdentityResolver::new(&storage);

        assert!(resolver.submit("12").is_err());
        assert_eq!(storage.writes(), 0);

        let identity = resolver.submit("5159491775").unwrap();
        assert_eq!(identity.source, IdentitySource::Interactive);
        assert_eq!(
            resolver.resolve(None),
            Resolution::Resolved(UserIdentity::new("5159491775", IdentitySource::Persisted))
        );
    }

    #[test]
    fn test_opt_out_is_ephemeral_and_not_persisted() {
        let storage = MemoryStorage::new();
        let resolver = IdentityResolver::new(&storage);
        let identity = resolver.opt_out();

        assert!(identity.is_ephemeral());
        assert!(identity.id.starts_with("temp_"));
        assert_eq!(identity.api_user_id(), UNKNOWN_USER);
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn test_api_user_id_for_real_user() {
        let identity = UserIdentity::new("5159491775", IdentitySource::Persisted);
        assert_eq!(identity.api_user_id(), "5159491775");
    }
}
