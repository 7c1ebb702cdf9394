//! Направление перевода и производные подписи интерфейса

use serde::{Deserialize, Serialize};

/// Направление перевода
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationDirection {
    /// Сленг -> литературный русский
    #[default]
    ToFormal,
    /// Литературный русский -> сленг
    ToInformal,
}

/// Подписи, однозначно определяемые направлением
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionLabels {
    pub left_label: &'static str,
    pub right_label: &'static str,
    pub left_heading: &'static str,
    pub right_heading: &'static str,
    pub placeholder: &'static str,
}

impl TranslationDirection {
    /// Противоположное направление
    pub fn toggled(self) -> Self {
        match self {
            Self::ToFormal => Self::ToInformal,
            Self::ToInformal => Self::ToFormal,
        }
    }

    /// Переключить направление на месте
    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    /// Имя направления в API
    pub fn api_name(self) -> &'static str {
        match self {
            Self::ToFormal => "to_formal",
            Self::ToInformal => "to_informal",
        }
    }

    /// Парсинг из строки ("to_formal", "to-informal", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "to_formal" | "formal" => Some(Self::ToFormal),
            "to_informal" | "informal" | "slang" => Some(Self::ToInformal),
            _ => None,
        }
    }

    pub fn labels(self) -> DirectionLabels {
        match self {
            Self::ToFormal => DirectionLabels {
                left_label: "сленговый",
                right_label: "русский",
                left_heading: "СЛЕНГ",
                right_heading: "РУССКИЙ",
                placeholder: "Введите сленговое выражение...",
            },
            Self::ToInformal => DirectionLabels {
                left_label: "русский",
                right_label: "сленговый",
                left_heading: "РУССКИЙ",
                right_heading: "СЛЕНГ",
                placeholder: "Введите русское выражение...",
            },
        }
    }
}

impl std::fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels = self.labels();
        write!(f, "{} → {}", labels.left_label, labels.right_label)
    }
}
