//! Slanglit CLI - консольная версия переводчика сленга

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use slanglit::api::ApiError;
use slanglit::backend::Backend;
use slanglit::config::{ConfigError, Settings, TranslatorMode};
use slanglit::dictionary::DICTIONARY;
use slanglit::direction::TranslationDirection;
use slanglit::i18n::t;
use slanglit::identity::{bridge_id_from_env, Resolution, UserIdentity};
use slanglit::logging;
use slanglit::session::{Session, Tone, TranslationRequest};
use slanglit::storage::USER_ID_KEY;
use slanglit::utils::sanitize_terminal;
use slanglit::view::render_history_html;
use std::io::{self, BufRead, IsTerminal, Write};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Направление для CLI
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
enum Direction {
    /// Сленг -> русский
    #[default]
    ToFormal,
    /// Русский -> сленг
    ToInformal,
}

impl From<Direction> for TranslationDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::ToFormal => TranslationDirection::ToFormal,
            Direction::ToInformal => TranslationDirection::ToInformal,
        }
    }
}

/// Режим перевода для CLI
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Удалённый API
    Remote,
    /// Встроенный словарь
    Dictionary,
}

impl From<Mode> for TranslatorMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Remote => TranslatorMode::Remote,
            Mode::Dictionary => TranslatorMode::Dictionary,
        }
    }
}

#[derive(Parser)]
#[command(name = "slanglit_cli")]
#[command(author = "slanglit")]
#[command(version = "1.0")]
#[command(about = "Переводчик молодёжного сленга на русский и обратно", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Telegram ID от хоста (иначе SLANGLIT_TELEGRAM_ID или сохранённый)
    #[arg(long, global = true)]
    telegram_id: Option<String>,

    /// Работать без Telegram ID (история не сохраняется)
    #[arg(long, global = true)]
    guest: bool,

    /// Стратегия перевода (по умолчанию из config.toml)
    #[arg(long, value_enum, global = true)]
    mode: Option<Mode>,

    /// Адрес API, например http://127.0.0.1:5000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Подробные логи в stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Перевести выражение (без текста - интерактивный режим)
    Translate {
        /// Текст для перевода
        text: Vec<String>,

        /// Направление перевода
        #[arg(short, long, value_enum, default_value_t = Direction::ToFormal)]
        direction: Direction,
    },

    /// Показать историю переводов
    History {
        /// Номер страницы (с 1)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Записей на странице (по умолчанию из config.toml)
        #[arg(short = 's', long)]
        page_size: Option<usize>,

        /// Вывести HTML разметку страницы
        #[arg(long)]
        html: bool,
    },

    /// Перевести снова запись из истории
    Replay {
        /// Номер записи на странице (с 1)
        index: usize,

        /// Номер страницы (с 1)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Направление, в котором переводить запись
        #[arg(short, long, value_enum, default_value_t = Direction::ToFormal)]
        direction: Direction,
    },

    /// Очистить локальную историю
    ClearHistory,

    /// Проверить доступность API
    Health,

    /// Статистика переводов
    Stats,

    /// Управление Telegram ID
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },

    /// Показать встроенный словарь
    Dictionary,
}

#[derive(Subcommand)]
enum IdentityAction {
    /// Показать текущий id
    Show,
    /// Сохранить id
    Set { id: String },
    /// Удалить сохранённый id
    Clear,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Identity(#[from] slanglit::identity::IdentityError),
    #[error("ошибка ввода-вывода: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Failed(String),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", sanitize_terminal(&e.to_string()));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    if let Some(mode) = cli.mode {
        settings.mode = mode.into();
    }
    if let Some(url) = &cli.api_url {
        settings.api_base_url = url.clone();
    }
    let backend = Backend::from_settings(settings)?;

    match cli.command {
        Commands::Translate { text, direction } => {
            let identity = resolve_identity(&backend, cli.telegram_id, cli.guest)?;
            let text = text.join(" ");
            if text.trim().is_empty() {
                interactive(&backend, identity, direction.into()).await
            } else {
                translate_once(&backend, identity, &text, direction.into()).await
            }
        }
        Commands::History { page, page_size, html } => {
            let identity = resolve_identity(&backend, cli.telegram_id, cli.guest)?;
            show_history(&backend, identity, page, page_size, html).await
        }
        Commands::Replay { index, page, direction } => {
            let identity = resolve_identity(&backend, cli.telegram_id, cli.guest)?;
            replay(&backend, identity, index, page, direction.into()).await
        }
        Commands::ClearHistory => {
            let identity = resolve_identity(&backend, cli.telegram_id, cli.guest)?;
            clear_history(&backend, identity).await
        }
        Commands::Health => health(&backend).await,
        Commands::Stats => {
            let identity = resolve_identity(&backend, cli.telegram_id, cli.guest)?;
            stats(&backend, identity).await
        }
        Commands::Identity { action } => identity_command(&backend, action),
        Commands::Dictionary => {
            print_dictionary();
            Ok(())
        }
    }
}

// === Пользователь ===

fn resolve_identity(backend: &Backend, flag: Option<String>, guest: bool) -> Result<UserIdentity, CliError> {
    let resolver = backend.resolver();
    if guest {
        return Ok(resolver.opt_out());
    }

    let bridge_id = flag.or_else(bridge_id_from_env);
    if let Resolution::Resolved(identity) = resolver.resolve(bridge_id.as_deref()) {
        return Ok(identity);
    }

    if !io::stdin().is_terminal() {
        tracing::warn!("no Telegram ID and stdin is not a terminal, continuing without history");
        return Ok(resolver.opt_out());
    }

    let tr = t(backend.settings().language);
    println!("{}", tr.identity_title);
    println!("{}", tr.identity_prompt);
    println!("{}", tr.identity_how_to);
    println!("{}", tr.identity_warning);

    let stdin = io::stdin();
    loop {
        print!("{} (Enter - {}): ", tr.identity_placeholder, tr.identity_skip);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            return Ok(resolver.opt_out());
        }

        match resolver.submit(&line) {
            Ok(identity) => {
                println!("✅ ID сохранён: {}", identity.id);
                return Ok(identity);
            }
            Err(e) => eprintln!("❌ {e}"),
        }
    }
}

fn identity_command(backend: &Backend, action: IdentityAction) -> Result<(), CliError> {
    let resolver = backend.resolver();
    match action {
        IdentityAction::Show => match resolver.resolve(None) {
            Resolution::Resolved(identity) => println!("👤 {}", identity.id),
            Resolution::NeedsInput => println!("Telegram ID не сохранён"),
        },
        IdentityAction::Set { id } => {
            let identity = resolver.submit(&id)?;
            println!("✅ ID сохранён: {}", identity.id);
        }
        IdentityAction::Clear => {
            let had = backend.storage().get(USER_ID_KEY).is_some();
            resolver.forget();
            if had {
                println!("🗑 Telegram ID удалён");
            } else {
                println!("Telegram ID не был сохранён");
            }
        }
    }
    Ok(())
}

// === Перевод ===

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn new_session(backend: &Backend, identity: UserIdentity) -> Session {
    let settings = backend.settings();
    let history = backend.load_history(&identity).await;
    if let Some(e) = history.load_error() {
        eprintln!("{} ({})", t(settings.language).history_load_failed, sanitize_terminal(e));
    }
    Session::new(identity, history, settings.page_size, settings.language)
}

/// Проверка API перед первым запросом (ошибка только логируется)
async fn probe(backend: &Backend) {
    if let Err(e) = backend.check_health().await {
        tracing::warn!(error = %e, "API health check failed");
    }
}

async fn run_request(backend: &Backend, session: &mut Session, request: TranslationRequest) {
    let pb = spinner(t(session.language()).translating);
    let result = backend.translate(&request, session.identity()).await;
    pb.finish_and_clear();
    session.complete_translation(&request, result, Instant::now());
}

fn print_result(session: &Session) {
    let labels = session.labels();
    let display = session.display();
    let icon = match display.tone {
        Tone::Success => "✅",
        Tone::NotFound => "🤷",
        Tone::Error => "❌",
        Tone::Placeholder | Tone::Pending => "ℹ️",
    };

    println!("{} {}: {}", icon, labels.right_heading, sanitize_terminal(&display.translation));
    if !display.explanation.is_empty() {
        println!("   {}", sanitize_terminal(&display.explanation).replace('\n', "\n   "));
    }
}

fn finish(session: &Session) -> Result<(), CliError> {
    print_result(session);
    match session.display().tone {
        Tone::Error => Err(CliError::Failed(t(session.language()).translation_failed.to_string())),
        _ => Ok(()),
    }
}

async fn translate_once(
    backend: &Backend,
    identity: UserIdentity,
    text: &str,
    direction: TranslationDirection,
) -> Result<(), CliError> {
    probe(backend).await;
    let mut session = new_session(backend, identity).await;
    if session.direction() != direction {
        session.toggle_direction();
    }

    session.set_input(text);
    if let Some(request) = session.begin_translation() {
        run_request(backend, &mut session, request).await;
    }
    finish(&session)
}

async fn interactive(backend: &Backend, identity: UserIdentity, direction: TranslationDirection) -> Result<(), CliError> {
    probe(backend).await;
    let mut session = new_session(backend, identity).await;
    if session.direction() != direction {
        session.toggle_direction();
    }

    println!("Пустая строка - выход, /swap - сменить направление");
    let stdin = io::stdin();
    loop {
        let labels = session.labels();
        print!("{} → {} > ", labels.left_label, labels.right_label);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if line == "/swap" {
            session.toggle_direction();
            continue;
        }

        session.set_input(line);
        if let Some(request) = session.begin_translation() {
            run_request(backend, &mut session, request).await;
        }
        print_result(&session);
    }
    Ok(())
}

// === История ===

async fn show_history(
    backend: &Backend,
    identity: UserIdentity,
    page: usize,
    page_size: Option<usize>,
    html: bool,
) -> Result<(), CliError> {
    let mut session = new_session(backend, identity).await;
    let tr = t(session.language());
    if let Some(size) = page_size {
        session.set_page_size(size);
    }
    session.select_page(page);

    if html {
        print!("{}", render_history_html(&session.history_page(), tr.history_empty));
        return Ok(());
    }

    if !session.history().is_recording() {
        println!("{}", tr.history_unavailable);
        println!("{}", tr.history_unavailable_hint);
        return Ok(());
    }

    let current = session.history_page();
    if current.items.is_empty() {
        println!("{}", tr.history_empty);
        return Ok(());
    }

    println!("📜 {} ({}/{})", tr.history_title, current.page, current.total_pages.max(1));
    for (idx, entry) in current.items.iter().enumerate() {
        let time = entry.formatted_time();
        println!(
            "{:>3}. {} → {}{}",
            idx + 1,
            sanitize_terminal(&entry.original),
            sanitize_terminal(&entry.translation),
            if time.is_empty() { String::new() } else { format!("  [{time}]") }
        );
        if !entry.explanation.is_empty() {
            println!("     {}", sanitize_terminal(&entry.explanation));
        }
    }
    Ok(())
}

async fn replay(
    backend: &Backend,
    identity: UserIdentity,
    index: usize,
    page: usize,
    direction: TranslationDirection,
) -> Result<(), CliError> {
    probe(backend).await;
    let mut session = new_session(backend, identity).await;
    if session.direction() != direction {
        session.toggle_direction();
    }
    session.show_history();
    session.select_page(page);

    let request = index
        .checked_sub(1)
        .and_then(|i| session.replay(i))
        .ok_or_else(|| CliError::Failed(format!("нет записи {index} на странице {}", session.current_page())))?;

    println!("🔁 {}", sanitize_terminal(&request.text));
    run_request(backend, &mut session, request).await;
    finish(&session)
}

async fn clear_history(backend: &Backend, identity: UserIdentity) -> Result<(), CliError> {
    let tr = t(backend.settings().language);
    // Серверную историю не загружаем: очистить её всё равно нельзя
    if backend.settings().mode == TranslatorMode::Remote {
        return Err(CliError::Failed(tr.clear_history_unsupported.to_string()));
    }
    let mut session = new_session(backend, identity).await;
    if !session.clear_history(Instant::now()) {
        let message = session.notice().map(|n| n.message.clone()).unwrap_or_default();
        return Err(CliError::Failed(message));
    }
    println!("🗑 История очищена");
    Ok(())
}

// === Сервис ===

async fn health(backend: &Backend) -> Result<(), CliError> {
    let tr = t(backend.settings().language);
    let Some(remote) = backend.remote() else {
        println!("📖 {}", tr.dictionary_mode);
        return Ok(());
    };

    println!("🔗 {}", remote.client().base_url());
    let pb = spinner(tr.api_checking);
    let result = backend.check_health().await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            println!("✅ {}", tr.api_available);
            Ok(())
        }
        Err(e) => Err(CliError::Failed(format!("{}: {}", tr.api_unavailable, e))),
    }
}

async fn stats(backend: &Backend, identity: UserIdentity) -> Result<(), CliError> {
    let session = new_session(backend, identity).await;
    let stats = backend.stats(session.identity(), session.history()).await?;

    println!("📊 Всего переводов: {}", stats.total);
    println!("   сленг → русский: {}", stats.to_formal);
    println!("   русский → сленг: {}", stats.to_informal);
    if let Some(last) = stats.last_activity {
        println!("   последняя активность: {}", last.format("%d.%m.%Y %H:%M"));
    }
    Ok(())
}

fn print_dictionary() {
    println!("📖 Встроенный словарь ({} слов)", DICTIONARY.len());
    for (slang, record) in DICTIONARY {
        println!("  {:<12} → {:<20} {}", slang, record.translation, record.explanation);
    }
}
