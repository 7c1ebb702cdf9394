//! Локальное хранилище ключ-значение
//!
//! Заменяет `localStorage` браузерной версии: три ключа (id пользователя,
//! источник id, история). Запись "по возможности" - ошибки логируются
//! вызывающим кодом и не останавливают приложение.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Ключ сохранённого id пользователя
pub const USER_ID_KEY: &str = "slanglit_user_id";
/// Ключ источника id ("telegram")
pub const USER_SOURCE_KEY: &str = "slanglit_user_source";
/// Ключ сериализованной истории переводов
pub const HISTORY_KEY: &str = "slanglit_history";

/// Имя файла хранилища внутри папки данных
const STORAGE_FILE: &str = "storage.json";

/// Ошибка хранилища
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),
    #[error("ошибка сериализации: {0}")]
    Json(#[from] serde_json::Error),
}

/// Хранилище строк по ключу
pub trait Storage: Send + Sync {
    /// Прочитать значение
    fn get(&self, key: &str) -> Option<String>;

    /// Записать значение
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Удалить значение
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Хранилище в JSON файле
pub struct FileStorage {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Открыть хранилище в папке `dir` (файл создаётся при первой записи)
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILE);

        // Повреждённый файл считаем пустым, как браузер с очищенным storage
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| match serde_json::from_str(&contents) {
                Ok(values) => Some(values),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "storage file is corrupt, starting empty");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Путь к файлу хранилища
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        // Создаём директорию если нужно
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = lock(&self.values);
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = lock(&self.values);
        if values.remove(key).is_some() {
            self.flush(&values)?;
        }
        Ok(())
    }
}

/// Хранилище в памяти (тесты и сессии без папки данных)
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сколько раз вызывались `set`/`remove`
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        lock(&self.values).remove(key);
        Ok(())
    }
}

/// Папка данных по умолчанию
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slanglit")
}
