//! История переводов - загрузка, добавление, постраничный просмотр

use crate::api::{ApiClient, RemoteStats, RemoteTranslation};
use crate::dictionary;
use crate::direction::TranslationDirection;
use crate::identity::UserIdentity;
use crate::storage::{Storage, HISTORY_KEY};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Максимальное количество записей в истории
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Размер страницы по умолчанию
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Запись в истории переводов
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Что ввёл пользователь
    pub original: String,
    /// Результат перевода
    pub translation: String,
    pub explanation: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Направление, в котором был сделан перевод
    #[serde(default)]
    pub direction: Option<TranslationDirection>,
}

impl TranslationEntry {
    /// Новая запись с текущим временем
    pub fn new(
        original: impl Into<String>,
        translation: impl Into<String>,
        explanation: impl Into<String>,
        direction: TranslationDirection,
    ) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
            explanation: explanation.into(),
            created_at: Some(Utc::now()),
            direction: Some(direction),
        }
    }

    /// Запись из ответа сервера: исходный текст и перевод зависят от направления пары
    pub fn from_remote(remote: RemoteTranslation) -> Self {
        let (original, translation) = match remote.direction {
            TranslationDirection::ToFormal => (remote.informal_text, remote.formal_text),
            TranslationDirection::ToInformal => (remote.formal_text, remote.informal_text),
        };

        Self {
            original,
            translation,
            explanation: remote.explanation.unwrap_or_default(),
            created_at: remote.created_at.as_deref().and_then(parse_timestamp),
            direction: Some(remote.direction),
        }
    }

    /// Дата/время в локальном часовом поясе
    pub fn formatted_time(&self) -> String {
        self.created_at
            .map(|ts| ts.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string())
            .unwrap_or_default()
    }

    /// Тот же перевод (время не учитывается)
    pub fn same_translation(&self, other: &TranslationEntry) -> bool {
        self.original == other.original
            && self.translation == other.translation
            && self.direction == other.direction
    }
}

/// Разбор времени сервера: RFC 3339 или формат SQLite `YYYY-MM-DD HH:MM:SS`
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Где живёт история
#[derive(Clone)]
pub enum HistoryBackend {
    /// Хранится на сервере, локально только в памяти
    Remote,
    /// Хранится в локальном хранилище
    Local(Arc<dyn Storage>),
    /// Временный пользователь - история не ведётся
    Ephemeral,
}

impl std::fmt::Debug for HistoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "Remote"),
            Self::Local(_) => write!(f, "Local"),
            Self::Ephemeral => write!(f, "Ephemeral"),
        }
    }
}

/// Откуда загружать историю
pub enum HistorySource<'a> {
    Remote { client: &'a ApiClient, limit: usize },
    Local { storage: Arc<dyn Storage>, seed: bool },
}

/// Страница истории (вычисляется при каждой отрисовке)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPage<'a> {
    pub items: &'a [TranslationEntry],
    /// Номер страницы, начиная с 1
    pub page: usize,
    pub total_pages: usize,
}

/// Статистика истории
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub to_formal: usize,
    pub to_informal: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

impl From<RemoteStats> for HistoryStats {
    fn from(remote: RemoteStats) -> Self {
        Self {
            total: remote.total_translations,
            to_formal: remote.to_formal_count,
            to_informal: remote.to_informal_count,
            last_activity: remote.last_activity.as_deref().and_then(parse_timestamp),
        }
    }
}

/// История переводов (новые записи в начале)
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<TranslationEntry>,
    backend: HistoryBackend,
    /// Мягкая ошибка загрузки (история при этом пустая)
    load_error: Option<String>,
}

impl History {
    /// Пустая история с заданным хранилищем
    pub fn new(backend: HistoryBackend) -> Self {
        Self {
            entries: Vec::new(),
            backend,
            load_error: None,
        }
    }

    /// История временного пользователя
    pub fn ephemeral() -> Self {
        Self::new(HistoryBackend::Ephemeral)
    }

    /// Загрузить историю пользователя
    ///
    /// Ошибки не пробрасываются: при сбое возвращается пустая история с `load_error`.
    pub async fn load(identity: &UserIdentity, source: HistorySource<'_>) -> Self {
        if identity.is_ephemeral() {
            return Self::ephemeral();
        }

        match source {
            HistorySource::Remote { client, limit } => Self::load_remote(client, &identity.id, limit).await,
            HistorySource::Local { storage, seed } => Self::load_local(storage, seed),
        }
    }

    async fn load_remote(client: &ApiClient, user_id: &str, limit: usize) -> Self {
        let mut history = Self::new(HistoryBackend::Remote);
        match client.history(user_id, limit).await {
            Ok(translations) => {
                history.entries = translations.into_iter().map(TranslationEntry::from_remote).collect();
                tracing::info!(user_id, count = history.entries.len(), "history loaded from API");
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to load history");
                history.load_error = Some(e.to_string());
            }
        }
        history
    }

    /// Загрузить историю из локального хранилища
    pub fn load_local(storage: Arc<dyn Storage>, seed: bool) -> Self {
        let stored = storage.get(HISTORY_KEY);
        let mut history = Self::new(HistoryBackend::Local(storage));

        match stored {
            Some(json) => match serde_json::from_str::<Vec<TranslationEntry>>(&json) {
                Ok(mut entries) => {
                    entries.truncate(MAX_HISTORY_ENTRIES);
                    history.entries = entries;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored history is corrupt, starting empty");
                    history.load_error = Some(e.to_string());
                }
            },
            None if seed => history.entries = Self::seed_entries(),
            None => {}
        }
        history
    }

    /// Примеры для первого запуска в режиме словаря
    pub fn seed_entries() -> Vec<TranslationEntry> {
        dictionary::DICTIONARY
            .iter()
            .take(3)
            .map(|(slang, record)| TranslationEntry {
                original: slang.to_string(),
                translation: record.translation.to_string(),
                explanation: record.explanation.to_string(),
                created_at: None,
                direction: Some(TranslationDirection::ToFormal),
            })
            .collect()
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backend(&self) -> &HistoryBackend {
        &self.backend
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// История ведётся (пользователь не временный)
    pub fn is_recording(&self) -> bool {
        !matches!(self.backend, HistoryBackend::Ephemeral)
    }

    /// Добавить запись
    pub fn append(&mut self, entry: TranslationEntry) {
        if !self.is_recording() {
            return;
        }

        self.entries.insert(0, entry); // Новые записи в начало

        // Ограничиваем размер
        if self.entries.len() > MAX_HISTORY_ENTRIES {
            self.entries.truncate(MAX_HISTORY_ENTRIES);
        }

        self.persist();
    }

    /// Вернуть в начало записи, сделанные пока история загружалась
    ///
    /// Записи, которые уже есть в загруженной истории, пропускаются.
    pub fn merge_newer(&mut self, newer: &[TranslationEntry]) {
        if !self.is_recording() {
            return;
        }
        let fresh: Vec<TranslationEntry> = newer
            .iter()
            .filter(|entry| !self.entries.iter().any(|e| e.same_translation(entry)))
            .cloned()
            .collect();
        if fresh.is_empty() {
            return;
        }

        self.entries.splice(0..0, fresh);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist();
    }

    /// Очищать можно только локальную историю: серверная вернётся при следующей загрузке
    pub fn is_clearable(&self) -> bool {
        matches!(self.backend, HistoryBackend::Local(_))
    }

    /// Очистить историю
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        let HistoryBackend::Local(storage) = &self.backend else {
            return;
        };

        let result = serde_json::to_string(&self.entries)
            .map_err(crate::storage::StorageError::from)
            .and_then(|json| storage.set(HISTORY_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist history");
        }
    }

    /// Количество страниц
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.entries.len().div_ceil(page_size)
    }

    /// Страница `page` (с 1). Вне диапазона - пустой срез.
    pub fn page(&self, page: usize, page_size: usize) -> HistoryPage<'_> {
        let total_pages = self.total_pages(page_size);
        let items = if page == 0 || page_size == 0 {
            &self.entries[0..0]
        } else {
            let start = (page - 1).saturating_mul(page_size).min(self.entries.len());
            let end = start.saturating_add(page_size).min(self.entries.len());
            &self.entries[start..end]
        };

        HistoryPage {
            items,
            page,
            total_pages,
        }
    }

    /// Статистика по направлениям
    pub fn stats(&self) -> HistoryStats {
        let mut stats = HistoryStats {
            total: self.entries.len(),
            ..HistoryStats::default()
        };

        for entry in &self.entries {
            match entry.direction {
                Some(TranslationDirection::ToFormal) => stats.to_formal += 1,
                Some(TranslationDirection::ToInformal) => stats.to_informal += 1,
                None => {}
            }
        }
        stats.last_activity = self.entries.iter().find_map(|e| e.created_at);

        stats
    }
}

/// Текст для повторного перевода: поле выбирается по *текущему* направлению
pub fn replay(entry: &TranslationEntry, direction: TranslationDirection) -> &str {
    match direction {
        TranslationDirection::ToFormal => &entry.original,
        TranslationDirection::ToInformal => &entry.translation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentitySource;
    use crate::storage::MemoryStorage;

    fn entry(i: usize) -> TranslationEntry {
        TranslationEntry::new(
            format!("слово{i}"),
            format!("перевод{i}"),
            format!("объяснение{i}"),
            TranslationDirection::ToFormal,
        )
    }

    fn filled(n: usize) -> History {
        let mut history = History::new(HistoryBackend::Remote);
        for i in 0..n {
            history.append(entry(i));
        }
        history
    }

    #[test]
    fn test_append_prepends() {
        let history = filled(3);
        assert_eq!(history.entries()[0].original, "слово2");
        assert_eq!(history.entries()[2].original, "слово0");
    }

    #[test]
    fn test_append_caps_at_fifty_and_evicts_oldest() {
        let history = filled(MAX_HISTORY_ENTRIES);
        assert_eq!(history.len(), 50);
        assert_eq!(history.entries()[49].original, "слово0");

        let mut history = history;
        history.append(entry(50));
        assert_eq!(history.len(), 50);
        assert_eq!(history.entries()[0].original, "слово50");
        // Самая старая запись вытеснена
        assert_eq!(history.entries()[49].original, "слово1");
        assert!(history.entries().iter().all(|e| e.original != "слово0"));
    }

    #[test]
    fn test_pages_of_seventeen() {
        let history = filled(17);
        assert_eq!(history.total_pages(8), 3);
        assert_eq!(history.page(1, 8).items.len(), 8);
        assert_eq!(history.page(2, 8).items.len(), 8);
        assert_eq!(history.page(3, 8).items.len(), 1);
        assert_eq!(history.page(3, 8).total_pages, 3);
    }

    #[test]
    fn test_pages_concatenate_to_history() {
        for n in [0usize, 1, 7, 8, 9, 17, 50] {
            let history = filled(n);
            for size in 1..=10 {
                let total = history.total_pages(size);
                let joined: Vec<TranslationEntry> = (1..=total)
                    .flat_map(|p| history.page(p, size).items.to_vec())
                    .collect();
                assert_eq!(joined.as_slice(), history.entries(), "n={n} size={size}");
            }
        }
    }

    #[test]
    fn test_page_out_of_range_is_empty() {
        let history = filled(5);
        assert!(history.page(0, 8).items.is_empty());
        assert!(history.page(2, 8).items.is_empty());
        assert!(history.page(usize::MAX, 8).items.is_empty());
        assert!(history.page(1, 0).items.is_empty());
        assert_eq!(history.total_pages(0), 0);
        assert_eq!(History::ephemeral().total_pages(8), 0);
    }

    #[test]
    fn test_replay_uses_current_direction() {
        let e = TranslationEntry::new("краш", "симпатия", "", TranslationDirection::ToInformal);
        assert_eq!(replay(&e, TranslationDirection::ToFormal), "краш");
        assert_eq!(replay(&e, TranslationDirection::ToInformal), "симпатия");
    }

    #[test]
    fn test_ephemeral_never_records() {
        let mut history = History::ephemeral();
        history.append(entry(1));
        assert!(history.is_empty());
        assert!(!history.is_recording());
        assert!(matches!(history.backend(), HistoryBackend::Ephemeral));
    }

    #[tokio::test]
    async fn test_ephemeral_load_is_empty_without_touching_storage() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(HISTORY_KEY, &serde_json::to_string(&vec![entry(1)]).unwrap()).unwrap();
        let writes = storage.writes();

        let identity = UserIdentity::ephemeral();
        let history = History::load(
            &identity,
            HistorySource::Local {
                storage: storage.clone(),
                seed: true,
            },
        )
        .await;

        assert!(history.is_empty());
        assert!(!history.is_recording());
        assert_eq!(storage.writes(), writes);
    }

    #[tokio::test]
    async fn test_local_roundtrip_through_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let identity = UserIdentity::new("5159491775", IdentitySource::Persisted);

        let mut history = History::load(
            &identity,
            HistorySource::Local {
                storage: storage.clone(),
                seed: false,
            },
        )
        .await;
        assert!(history.is_empty());

        history.append(entry(1));
        history.append(entry(2));
        assert_eq!(storage.writes(), 2);

        let reloaded = History::load_local(storage.clone(), false);
        assert_eq!(reloaded.entries(), history.entries());
    }

    #[test]
    fn test_local_seed_only_when_absent() {
        let storage = Arc::new(MemoryStorage::new());
        let seeded = History::load_local(storage.clone(), true);
        assert_eq!(seeded.len(), 3);
        assert_eq!(seeded.entries()[0].original, "краш");

        storage.set(HISTORY_KEY, "[]").unwrap();
        let stored = History::load_local(storage, true);
        assert!(stored.is_empty());
    }

    #[test]
    fn test_local_corrupt_history_is_soft_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(HISTORY_KEY, "not json").unwrap();
        let history = History::load_local(storage, false);
        assert!(history.is_empty());
        assert!(history.load_error().is_some());
    }

    #[test]
    fn test_from_remote_maps_by_direction() {
        let remote = RemoteTranslation {
            direction: TranslationDirection::ToInformal,
            informal_text: "чилить".into(),
            formal_text: "отдыхать".into(),
            explanation: None,
            created_at: Some("2024-05-01 10:30:00".into()),
        };
        let e = TranslationEntry::from_remote(remote);
        assert_eq!(e.original, "отдыхать");
        assert_eq!(e.translation, "чилить");
        assert_eq!(e.explanation, "");

        let expected = parse_timestamp("2024-05-01 10:30:00")
            .unwrap()
            .with_timezone(&Local)
            .format("%d.%m.%Y %H:%M")
            .to_string();
        assert_eq!(e.formatted_time(), expected);
    }

    #[test]
    fn test_formatted_time_is_local() {
        let ts = parse_timestamp("2024-05-01T10:30:00+00:00").unwrap();
        let e = TranslationEntry {
            created_at: Some(ts),
            ..entry(1)
        };
        let local = ts.with_timezone(&Local).naive_local();
        assert_eq!(e.formatted_time(), local.format("%d.%m.%Y %H:%M").to_string());

        let undated = TranslationEntry { created_at: None, ..entry(2) };
        assert_eq!(undated.formatted_time(), "");
    }

    #[test]
    fn test_merge_newer_skips_known_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut loaded = History::load_local(storage.clone(), false);
        loaded.entries = vec![entry(1)];

        loaded.merge_newer(&[entry(2), entry(1)]);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.entries()[0].original, "слово2");
        assert_eq!(storage.writes(), 1);

        let reloaded = History::load_local(storage.clone(), false);
        assert_eq!(reloaded.len(), 2);

        // Нечего добавлять - хранилище не трогаем
        loaded.merge_newer(&[entry(2)]);
        assert_eq!(storage.writes(), 1);

        let mut ephemeral = History::ephemeral();
        ephemeral.merge_newer(&[entry(3)]);
        assert!(ephemeral.is_empty());
    }

    #[test]
    fn test_only_local_history_is_clearable() {
        assert!(History::load_local(Arc::new(MemoryStorage::new()), false).is_clearable());
        assert!(!History::new(HistoryBackend::Remote).is_clearable());
        assert!(!History::ephemeral().is_clearable());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-05-01 10:30:00").is_some());
        assert!(parse_timestamp("2024-05-01T10:30:00.123456").is_some());
        assert!(parse_timestamp("2024-05-01T10:30:00+03:00").is_some());
        assert!(parse_timestamp("вчера").is_none());
    }

    #[test]
    fn test_stats_by_direction() {
        let mut history = History::new(HistoryBackend::Remote);
        history.append(entry(1));
        history.append(TranslationEntry::new("отдыхать", "чилить", "", TranslationDirection::ToInformal));

        let stats = history.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.to_formal, 1);
        assert_eq!(stats.to_informal, 1);
        assert!(stats.last_activity.is_some());
    }
}
