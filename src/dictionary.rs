//! Встроенный словарь сленга
//!
//! Порядок записей фиксирован: при обратном поиске по подстроке побеждает
//! первая подходящая запись в порядке объявления.

/// Запись словаря (ключ - сленговое слово в нижнем регистре)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryRecord {
    pub translation: &'static str,
    pub explanation: &'static str,
}

const fn record(translation: &'static str, explanation: &'static str) -> DictionaryRecord {
    DictionaryRecord { translation, explanation }
}

/// Словарь: упорядоченный список пар (сленг, запись)
pub static DICTIONARY: &[(&str, DictionaryRecord)] = &[
    ("краш", record("симпатия", "Человек, который вам нравится")),
    ("кринж", record("стыд", "Чувство неловкости за чужие или свои действия")),
    ("рофл", record("шутка", "Розыгрыш или что-то очень смешное")),
    ("чилить", record("отдыхать", "Расслабляться, ничего не делать")),
    ("агриться", record("злиться", "Раздражаться, проявлять агрессию")),
    ("хайп", record("шумиха", "Ажиотаж вокруг чего-либо")),
    ("изи", record("легко", "Что-то простое, не требующее усилий")),
    ("лол", record("смешно", "Выражение смеха")),
    ("кек", record("смешно", "Ироничный смех, синоним «лол»")),
    ("го", record("пойдём", "Призыв начать что-то делать вместе")),
    ("имба", record("очень сильный", "Что-то непобедимое, превосходящее остальных")),
    ("вайб", record("атмосфера", "Настроение, ощущение от места или компании")),
    ("токсик", record("грубый человек", "Тот, кто ведёт себя агрессивно и неприятно")),
    ("зашквар", record("позор", "Что-то постыдное, недостойное")),
    ("флексить", record("хвастаться", "Выставлять напоказ свои достижения или вещи")),
    ("душнила", record("зануда", "Человек, который утомляет придирками")),
    ("бро", record("друг", "Близкий товарищ")),
    ("сорян", record("извини", "Небрежное извинение")),
    ("рил", record("правда", "Действительно, на самом деле")),
    ("пруф", record("доказательство", "Подтверждение сказанного")),
    ("юзать", record("использовать", "Пользоваться чем-либо")),
    ("шарить", record("разбираться", "Хорошо понимать тему")),
    ("хейтить", record("ненавидеть", "Открыто критиковать и недолюбливать")),
    ("тильт", record("раздражение", "Состояние, когда эмоции мешают думать")),
    ("кайф", record("удовольствие", "Сильное приятное ощущение")),
    ("жиза", record("жизненная ситуация", "То, что знакомо по собственному опыту")),
    ("треш", record("ужас", "Что-то плохое или шокирующее")),
    ("сасный", record("привлекательный", "Симпатичный, милый")),
];

/// Нормализация ввода перед поиском
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Точный поиск сленгового слова (сленг -> русский)
pub fn lookup_slang(text: &str) -> Option<DictionaryRecord> {
    let key = normalize(text);
    if key.is_empty() {
        return None;
    }

    DICTIONARY
        .iter()
        .find(|(slang, _)| *slang == key)
        .map(|(_, record)| *record)
}

/// Обратный поиск (русский -> сленг)
///
/// Совпадением считается вхождение подстроки в любую сторону:
/// перевод содержит ввод или ввод содержит перевод. Возвращает сленговый ключ и запись.
pub fn lookup_formal(text: &str) -> Option<(&'static str, DictionaryRecord)> {
    let needle = normalize(text);
    if needle.is_empty() {
        return None;
    }

    DICTIONARY
        .iter()
        .find(|(_, record)| {
            let value = record.translation.to_lowercase();
            value.contains(&needle) || needle.contains(&value)
        })
        .map(|(slang, record)| (*slang, *record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_lowercase_and_unique() {
        for (i, (key, _)) in DICTIONARY.iter().enumerate() {
            assert_eq!(*key, key.to_lowercase());
            assert!(
                DICTIONARY[i + 1..].iter().all(|(other, _)| other != key),
                "duplicate key {key}"
            );
        }
    }

    #[test]
    fn test_lookup_slang_crush() {
        let rec = lookup_slang("краш").unwrap();
        assert_eq!(rec.translation, "симпатия");
        assert_eq!(rec.explanation, "Человек, который вам нравится");
    }

    #[test]
    fn test_lookup_slang_case_insensitive() {
        assert_eq!(lookup_slang("КРАШ"), lookup_slang("краш"));
        assert_eq!(lookup_slang("  Кринж "), lookup_slang("кринж"));
    }

    #[test]
    fn test_lookup_slang_exact_only() {
        // Подстрока ключа не считается совпадением в прямом направлении
        assert!(lookup_slang("кра").is_none());
        assert!(lookup_slang("несуществующееслово").is_none());
        assert!(lookup_slang("   ").is_none());
    }

    #[test]
    fn test_lookup_formal_value_contains_input() {
        let (slang, rec) = lookup_formal("симпат").unwrap();
        assert_eq!(slang, "краш");
        assert_eq!(rec.translation, "симпатия");
    }

    #[test]
    fn test_lookup_formal_input_contains_value() {
        let (slang, _) = lookup_formal("Мне так СТЫД за это").unwrap();
        assert_eq!(slang, "кринж");
    }

    #[test]
    fn test_lookup_formal_first_match_wins() {
        // "лол" и "кек" оба переводятся как "смешно" - берётся первый по порядку
        let (slang, _) = lookup_formal("смешно").unwrap();
        assert_eq!(slang, "лол");
    }

    #[test]
    fn test_lookup_formal_not_found() {
        assert!(lookup_formal("квантовая хромодинамика").is_none());
        assert!(lookup_formal("").is_none());
    }
}
