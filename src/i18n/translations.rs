use super::Translations;

pub static RU: Translations = Translations {
    app_title: "Сленглит",
    app_subtitle: "мини-приложение",
    nav_translate: "Перевод",
    nav_history: "История",

    translate_button: "ПЕРЕВЕСТИ",
    swap_tooltip: "Поменять направление перевода",
    explanation_title: "Объяснение",
    result_placeholder: "Результат перевода...",
    explanation_placeholder: "Здесь появится объяснение термина",
    history_saved_note: "✅ История сохраняется",
    history_not_saved_note: "⚠️ История не сохраняется",
    empty_input: "Введите текст для перевода",
    empty_input_hint: "Начните вводить текст для перевода",
    translating: "Переводим...",
    processing: "Обрабатываем запрос...",
    not_found: "Перевод не найден",
    not_found_hint: "Попробуйте другое слово или смените направление перевода",
    not_saved_suffix: "⚠️ Перевод не сохранен в историю",
    error_title: "Ошибка",
    translation_failed: "Не удалось выполнить перевод",
    service_unavailable: "Сервер переводов временно недоступен. Пожалуйста, попробуйте позже.",
    copy: "Копировать",

    history_title: "История переводов",
    history_empty: "История переводов пуста",
    history_unavailable: "📝 История недоступна",
    history_unavailable_hint: "Введите Telegram ID для сохранения переводов",
    history_load_failed: "❌ Не удалось загрузить историю",
    clear_history: "Очистить историю",
    clear_history_unsupported: "История хранится на сервере и очищается через бота",
    replay_tooltip: "Нажмите, чтобы перевести снова",

    identity_title: "🔐 Требуется Telegram ID",
    identity_prompt: "Для сохранения истории переводов введите ваш Telegram ID",
    identity_how_to: "Откройте бота https://t.me/slenglit_bot?start=start и скопируйте ваш ID из сообщения бота",
    identity_placeholder: "Введите ваш Telegram ID (только цифры)",
    identity_save: "✅ Сохранить ID",
    identity_skip: "⚠️ Без истории",
    identity_warning: "Без Telegram ID переводы будут работать, но история не сохранится",
    change_user: "Сменить ID",

    status: "Статус",
    api_available: "API доступен",
    api_unavailable: "API недоступен",
    api_checking: "Проверяем подключение к API...",
    dictionary_mode: "Встроенный словарь",
};

pub static EN: Translations = Translations {
    app_title: "Slanglit",
    app_subtitle: "mini app",
    nav_translate: "Translate",
    nav_history: "History",

    translate_button: "TRANSLATE",
    swap_tooltip: "Swap translation direction",
    explanation_title: "Explanation",
    result_placeholder: "Translation result...",
    explanation_placeholder: "The explanation of the term will appear here",
    history_saved_note: "✅ History is saved",
    history_not_saved_note: "⚠️ History is not saved",
    empty_input: "Enter text to translate",
    empty_input_hint: "Start typing to translate",
    translating: "Translating...",
    processing: "Processing request...",
    not_found: "Translation not found",
    not_found_hint: "Try another word or swap the direction",
    not_saved_suffix: "⚠️ Translation was not saved to history",
    error_title: "Error",
    translation_failed: "Translation failed",
    service_unavailable: "The translation server is temporarily unavailable. Please try again later.",
    copy: "Copy",

    history_title: "Translation history",
    history_empty: "Translation history is empty",
    history_unavailable: "📝 History unavailable",
    history_unavailable_hint: "Enter your Telegram ID to keep translations",
    history_load_failed: "❌ Failed to load history",
    clear_history: "Clear history",
    clear_history_unsupported: "History is stored on the server and is cleared through the bot",
    replay_tooltip: "Click to translate again",

    identity_title: "🔐 Telegram ID required",
    identity_prompt: "Enter your Telegram ID to keep your translation history",
    identity_how_to: "Open https://t.me/slenglit_bot?start=start and copy your ID from the bot's message",
    identity_placeholder: "Your Telegram ID (digits only)",
    identity_save: "✅ Save ID",
    identity_skip: "⚠️ Without history",
    identity_warning: "Translations work without a Telegram ID, but history will not be kept",
    change_user: "Change ID",

    status: "Status",
    api_available: "API available",
    api_unavailable: "API unavailable",
    api_checking: "Checking API connection...",
    dictionary_mode: "Built-in dictionary",
};
