//! Отображение: навигация, разметка страницы истории

use crate::history::{HistoryPage, TranslationEntry};
use crate::session::Screen;
use std::fmt::Write;

/// Какой экран видим и какие кнопки навигации подсвечены
///
/// На каждом экране есть пара кнопок "Перевод"/"История", всего четыре.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub translate_visible: bool,
    pub history_visible: bool,
    /// Кнопка "Перевод" на экране перевода
    pub translate_nav_on_translate: bool,
    /// Кнопка "История" на экране перевода
    pub history_nav_on_translate: bool,
    /// Кнопка "Перевод" на экране истории
    pub translate_nav_on_history: bool,
    /// Кнопка "История" на экране истории
    pub history_nav_on_history: bool,
}

impl NavState {
    pub fn for_screen(screen: Screen) -> Self {
        let on_translate = screen == Screen::Translate;
        Self {
            translate_visible: on_translate,
            history_visible: !on_translate,
            translate_nav_on_translate: on_translate,
            history_nav_on_translate: false,
            translate_nav_on_history: false,
            history_nav_on_history: !on_translate,
        }
    }
}

/// Экранирование HTML
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Номера кнопок пагинации (пусто, если страница одна)
pub fn page_buttons(total_pages: usize) -> Vec<usize> {
    if total_pages <= 1 {
        return Vec::new();
    }
    (1..=total_pages).collect()
}

/// Разметка одной страницы истории
///
/// Весь текст из истории экранируется.
pub fn render_history_html(page: &HistoryPage<'_>, empty_message: &str) -> String {
    let mut html = String::from("<div class=\"history-list\">\n");

    if page.items.is_empty() {
        let _ = writeln!(html, "  <div class=\"empty-history\">{}</div>", escape_html(empty_message));
    }

    for (index, entry) in page.items.iter().enumerate() {
        render_entry(&mut html, index, entry);
    }
    html.push_str("</div>\n");

    let buttons = page_buttons(page.total_pages);
    if !buttons.is_empty() {
        html.push_str("<div class=\"pagination\">\n");
        for number in buttons {
            let class = if number == page.page { "page-btn active" } else { "page-btn" };
            let _ = writeln!(html, "  <button class=\"{class}\" data-page=\"{number}\">{number}</button>");
        }
        html.push_str("</div>\n");
    }

    html
}

fn render_entry(html: &mut String, index: usize, entry: &TranslationEntry) {
    let _ = writeln!(html, "  <div class=\"history-item\" data-index=\"{index}\">");
    let _ = writeln!(
        html,
        "    <div class=\"history-original\">{}</div>",
        escape_html(&entry.original)
    );
    let _ = writeln!(
        html,
        "    <div class=\"history-translation\">{}</div>",
        escape_html(&entry.translation)
    );
    if !entry.explanation.is_empty() {
        let _ = writeln!(
            html,
            "    <div class=\"history-explanation\">{}</div>",
            escape_html(&entry.explanation)
        );
    }
    let time = entry.formatted_time();
    if !time.is_empty() {
        let _ = writeln!(html, "    <div class=\"history-time\">{time}</div>");
    }
    html.push_str("  </div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::TranslationDirection;
    use crate::history::{History, HistoryBackend};

    #[test]
    fn test_nav_state_is_exclusive() {
        let nav = NavState::for_screen(Screen::Translate);
        assert!(nav.translate_visible && !nav.history_visible);
        assert!(nav.translate_nav_on_translate && !nav.history_nav_on_translate);

        let nav = NavState::for_screen(Screen::History);
        assert!(!nav.translate_visible && nav.history_visible);
        assert!(nav.history_nav_on_history && !nav.translate_nav_on_history);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script> & \"y\""),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;y&quot;"
        );
        assert_eq!(escape_html("краш"), "краш");
    }

    #[test]
    fn test_history_html_escapes_user_text() {
        let mut history = History::new(HistoryBackend::Remote);
        history.append(TranslationEntry::new(
            "<img src=x onerror=alert(1)>",
            "ok",
            "",
            TranslationDirection::ToFormal,
        ));

        let html = render_history_html(&history.page(1, 8), "пусто");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        // Одна страница - без пагинации
        assert!(!html.contains("pagination"));
    }

    #[test]
    fn test_history_html_pagination_and_empty() {
        let mut history = History::new(HistoryBackend::Remote);
        for i in 0..17 {
            history.append(TranslationEntry::new(format!("w{i}"), "t", "", TranslationDirection::ToFormal));
        }
        let html = render_history_html(&history.page(2, 8), "пусто");
        assert_eq!(html.matches("history-item").count(), 8);
        assert!(html.contains("<button class=\"page-btn active\" data-page=\"2\">2</button>"));
        assert_eq!(html.matches("page-btn").count(), 3);

        let empty = History::ephemeral();
        let html = render_history_html(&empty.page(1, 8), "История переводов пуста");
        assert!(html.contains("История переводов пуста"));
    }

    #[test]
    fn test_page_buttons() {
        assert!(page_buttons(0).is_empty());
        assert!(page_buttons(1).is_empty());
        assert_eq!(page_buttons(3), vec![1, 2, 3]);
    }
}
