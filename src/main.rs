use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tracing::{info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::{Config, LoggingConfig};
use services::{
    create_window_manager,
    KeyBindings,
    Switcher,
    TerminalKeyboardListener,
    WindowActivator,
};

#[derive(Parser, Debug)]
#[command(name = "app-switcher")]
#[command(about = "Переключение на окно приложения нажатием одной клавиши")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "app-switcher.toml")]
    config: String,

    /// Режим сухого запуска (окна эмулируются в памяти)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (перекрывает значение из конфигурации)
    #[arg(long)]
    log_level: Option<String>,

    /// Бэкенд окон: auto, ewmh или dry-run
    #[arg(long)]
    backend: Option<String>,

    /// Показать окна, которые видит бэкенд, и выйти
    #[arg(long)]
    list_windows: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Config::load(&args.config)?
        .with_overrides(args.log_level.as_deref(), args.backend.as_deref());
    config.validate()?;

    // Инициализация системы логирования
    init_tracing(&config.logging)?;

    info!("Запуск App Switcher v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - окна эмулируются в памяти");
    }

    let window_manager = create_window_manager(&config, args.dry_run)?;
    let activator = WindowActivator::new(window_manager);

    if args.list_windows {
        for window in activator.visible_windows()? {
            println!("{}\t{}", window.handle, window.title);
        }
        return Ok(());
    }

    let bindings = KeyBindings::from_config(config.bindings());
    if bindings.is_empty() {
        warn!("Нет ни одной привязки клавиш - таблица будет пустой");
    }

    // Raw-режим выключается при выходе из области видимости switcher
    let keys = TerminalKeyboardListener::new()?;
    let mut switcher = Switcher::new(bindings, activator, keys, io::stdout());

    if let Some(title) = &config.ui.terminal_title {
        switcher.set_terminal_title(title)?;
    }

    switcher.run()?;

    info!("App Switcher завершил работу");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))?;

    // Таблица занимает stdout, логи уходят в файл или в stderr
    let writer = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Не удалось открыть файл логов {:?}", path))?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(writer);

    match logging.format.as_str() {
        "compact" => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.compact())
            .init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init(),
    }

    Ok(())
}
