//! Перевод по встроенному словарю

use super::{TranslateError, Translation, TranslationOutcome, Translator};
use crate::dictionary;
use crate::direction::TranslationDirection;
use crate::identity::UserIdentity;
use async_trait::async_trait;

/// Переводчик без сети
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryTranslator;

impl DictionaryTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Синхронный поиск (используется и из async обёртки)
    pub fn lookup(&self, text: &str, direction: TranslationDirection) -> TranslationOutcome {
        let found = match direction {
            TranslationDirection::ToFormal => dictionary::lookup_slang(text).map(|record| Translation {
                translation: record.translation.to_string(),
                explanation: record.explanation.to_string(),
            }),
            TranslationDirection::ToInformal => dictionary::lookup_formal(text).map(|(slang, record)| Translation {
                translation: slang.to_string(),
                explanation: record.explanation.to_string(),
            }),
        };

        match found {
            Some(translation) => TranslationOutcome::Found(translation),
            None => {
                tracing::debug!(text, direction = direction.api_name(), "dictionary miss");
                TranslationOutcome::NotFound
            }
        }
    }
}

#[async_trait]
impl Translator for DictionaryTranslator {
    async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
        _identity: &UserIdentity,
    ) -> Result<TranslationOutcome, TranslateError> {
        Ok(self.lookup(text, direction))
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(outcome: TranslationOutcome) -> Translation {
        match outcome {
            TranslationOutcome::Found(t) => t,
            TranslationOutcome::NotFound => panic!("expected a match"),
        }
    }

    #[test]
    fn test_to_formal_crush() {
        let t = found(DictionaryTranslator::new().lookup("краш", TranslationDirection::ToFormal));
        assert_eq!(t.translation, "симпатия");
        assert_eq!(t.explanation, "Человек, который вам нравится");
    }

    #[test]
    fn test_case_insensitive() {
        let tr = DictionaryTranslator::new();
        assert_eq!(
            tr.lookup("КРАШ", TranslationDirection::ToFormal),
            tr.lookup("краш", TranslationDirection::ToFormal)
        );
        assert_eq!(
            tr.lookup("СИМПАТИЯ", TranslationDirection::ToInformal),
            tr.lookup("симпатия", TranslationDirection::ToInformal)
        );
    }

    #[test]
    fn test_to_informal_returns_slang_key() {
        let t = found(DictionaryTranslator::new().lookup("отдыхать", TranslationDirection::ToInformal));
        assert_eq!(t.translation, "чилить");
    }

    #[test]
    fn test_not_found_is_outcome() {
        let tr = DictionaryTranslator::new();
        assert_eq!(
            tr.lookup("несуществующееслово", TranslationDirection::ToFormal),
            TranslationOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_trait_ignores_identity() {
        let tr = DictionaryTranslator::new();
        let identity = UserIdentity::ephemeral();
        let outcome = tr.translate("изи", TranslationDirection::ToFormal, &identity).await.unwrap();
        assert_eq!(found(outcome).translation, "легко");
        assert_eq!(tr.name(), "dictionary");
    }
}
