//! Модуль интернационализации (i18n)
//!
//! Поддерживаемые языки интерфейса: русский, английский.
//! Подписи направлений перевода всегда русские (см. `direction`).

mod translations;

pub use translations::*;

use serde::{Deserialize, Serialize};

/// Поддерживаемые языки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Название языка на этом языке
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Russian => "Русский",
            Language::English => "English",
        }
    }

    /// Флаг/эмодзи для языка
    pub fn flag(&self) -> &'static str {
        match self {
            Language::Russian => "🇷🇺",
            Language::English => "🇬🇧",
        }
    }

    /// Все доступные языки
    pub fn all() -> &'static [Language] {
        &[Language::Russian, Language::English]
    }
}

/// Структура с переводами всех строк интерфейса
#[derive(Debug, Clone)]
pub struct Translations {
    // === Заголовок и навигация ===
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub nav_translate: &'static str,
    pub nav_history: &'static str,

    // === Перевод ===
    pub translate_button: &'static str,
    pub swap_tooltip: &'static str,
    pub explanation_title: &'static str,
    pub result_placeholder: &'static str,
    pub explanation_placeholder: &'static str,
    pub history_saved_note: &'static str,
    pub history_not_saved_note: &'static str,
    pub empty_input: &'static str,
    pub empty_input_hint: &'static str,
    pub translating: &'static str,
    pub processing: &'static str,
    pub not_found: &'static str,
    pub not_found_hint: &'static str,
    pub not_saved_suffix: &'static str,
    pub error_title: &'static str,
    pub translation_failed: &'static str,
    pub service_unavailable: &'static str,
    pub copy: &'static str,

    // === История ===
    pub history_title: &'static str,
    pub history_empty: &'static str,
    pub history_unavailable: &'static str,
    pub history_unavailable_hint: &'static str,
    pub history_load_failed: &'static str,
    pub clear_history: &'static str,
    pub clear_history_unsupported: &'static str,
    pub replay_tooltip: &'static str,

    // === Telegram ID ===
    pub identity_title: &'static str,
    pub identity_prompt: &'static str,
    pub identity_how_to: &'static str,
    pub identity_placeholder: &'static str,
    pub identity_save: &'static str,
    pub identity_skip: &'static str,
    pub identity_warning: &'static str,
    pub change_user: &'static str,

    // === Общее ===
    pub status: &'static str,
    pub api_available: &'static str,
    pub api_unavailable: &'static str,
    pub api_checking: &'static str,
    pub dictionary_mode: &'static str,
}

impl Translations {
    /// Получить переводы для указанного языка
    pub fn for_language(lang: Language) -> &'static Translations {
        match lang {
            Language::Russian => &translations::RU,
            Language::English => &translations::EN,
        }
    }
}

/// Короткий доступ к переводам
pub fn t(lang: Language) -> &'static Translations {
    Translations::for_language(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_russian() {
        assert_eq!(Language::default(), Language::Russian);
        assert_eq!(t(Language::Russian).not_found, "Перевод не найден");
    }

    #[test]
    fn test_language_codes_in_serde() {
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
        let lang: Language = serde_json::from_str("\"ru\"").unwrap();
        assert_eq!(lang, Language::Russian);
    }

    #[test]
    fn test_all_languages_have_titles() {
        for lang in Language::all() {
            let tr = t(*lang);
            assert!(!tr.app_title.is_empty());
            assert!(!tr.translate_button.is_empty());
            assert!(!tr.not_found.is_empty());
        }
    }
}
