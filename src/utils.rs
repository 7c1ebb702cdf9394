//! Вспомогательные утилиты

use std::time::{SystemTime, UNIX_EPOCH};

/// Безопасно обрезает строку до max_chars символов (не байт!)
/// Если строка длиннее - оставляет начало и добавляет "..."
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let keep = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(keep).collect::<String>())
    }
}

/// Убирает управляющие символы перед выводом в терминал
///
/// Переводы строк и табуляция сохраняются, всё остальное (ESC-последовательности и т.п.) вырезается.
pub fn sanitize_terminal(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Текущее время в миллисекундах с начала эпохи
pub fn current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_string("краш", 10), "краш");
        assert_eq!(truncate_string("", 3), "");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // 10 кириллических символов = 20 байт
        let s = "абвгдеёжзи";
        let t = truncate_string(s, 6);
        assert_eq!(t, "абв...");
        assert_eq!(t.chars().count(), 6);
    }

    #[test]
    fn test_sanitize_terminal_strips_escape_sequences() {
        let s = "краш\u{1b}[31m красный\u{7}";
        assert_eq!(sanitize_terminal(s), "краш[31m красный");
    }

    #[test]
    fn test_sanitize_terminal_keeps_newlines() {
        assert_eq!(sanitize_terminal("a\nb\tc"), "a\nb\tc");
    }

    #[test]
    fn test_current_millis() {
        // Должно быть больше чем 1 января 2024
        assert!(current_millis() > 1_704_067_200_000);
    }
}
