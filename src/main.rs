use ahk_script::error::ScriptError;
use ahk_script::services::{create_clipboard_backend, create_mediator, create_tool_runner};
use ahk_script::{utils, Config, ScriptApi, Store};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, error, info, warn};

mod cli;

use cli::{Command, Outcome};

#[derive(Parser, Debug)]
#[command(name = "ahk-script")]
#[command(about = "Скриптовый API автоматизации рабочего стола: клавиатура, диалоги, буфер обмена, окна")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "ahk-script.toml")]
    config: String,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (перекрывает logging.filter из конфигурации)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Config::load(&args.config)?;

    // Инициализация системы логирования
    init_tracing(&config, args.log_level.as_deref())?;

    debug!("Запуск ahk-script v{}", env!("CARGO_PKG_VERSION"));
    debug!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    if args.command.is_check() {
        let statuses = utils::check_environment(&config);
        for status in &statuses {
            let state = if status.is_available() { "ok" } else { "missing" };
            println!("{}\t{}\t{}", status.setting, status.program, state);
        }
        return Ok(());
    }

    // Инициализация компонентов
    let store_path = store_path(&config);
    let store = Arc::new(match &store_path {
        Some(path) => Store::load(path)
            .with_context(|| format!("Не удалось загрузить хранилище {:?}", path))?,
        None => Store::new(),
    });

    let runner = create_tool_runner(&config.tools, args.dry_run);
    let mediator = create_mediator(&config.tools, runner.clone(), args.dry_run);
    let clipboard = create_clipboard_backend(
        &config.tools,
        tokio::runtime::Handle::current(),
        args.dry_run,
    );
    let api = Arc::new(ScriptApi::new(&config, mediator, runner, clipboard, store.clone()));

    // Все операции API блокирующие
    let dry_run = args.dry_run;
    let command = args.command;
    let task_api = Arc::clone(&api);
    let task = tokio::task::spawn_blocking(move || cli::execute(&task_api, command, dry_run));

    let outcome = tokio::select! {
        joined = task => joined.context("Задача скрипта завершилась аварийно")?,
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
                Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
            }
            // Блокирующий поток не прерывается, процесс завершается целиком
            std::process::exit(130);
        }
    };

    match outcome {
        Ok(outcome) => {
            let code = print_outcome(outcome, &store, store_path.as_ref(), dry_run)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(e) => match e.exit_code() {
            Some(code) => {
                error!("Команда завершилась с кодом {}", code);
                if let ScriptError::CommandFailed { output, .. } = &e {
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                }
                std::process::exit(if code > 0 { code } else { 1 });
            }
            None => Err(e.into()),
        },
    }
}

/// Напечатать результат; возвращает код выхода процесса
fn print_outcome(
    outcome: Outcome,
    store: &Store,
    store_path: Option<&PathBuf>,
    dry_run: bool,
) -> Result<i32> {
    let code = match outcome {
        Outcome::Nothing => 0,
        Outcome::Text(text) => {
            println!("{}", text);
            0
        }
        Outcome::Tool(output) => {
            println!("{}", output);
            0
        }
        Outcome::Flag(found) => {
            println!("{}", found);
            if found { 0 } else { 1 }
        }
        Outcome::Lines(lines) => {
            for line in lines {
                println!("{}", line);
            }
            0
        }
        Outcome::StoreChanged => {
            match store_path {
                Some(path) if !dry_run => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    store.save(path)?;
                    info!("Хранилище сохранено: {:?}", path);
                }
                Some(_) => info!("[DRY RUN] Хранилище не сохраняется"),
                None => warn!("Путь хранилища не определён, изменения будут потеряны"),
            }
            0
        }
    };

    Ok(code)
}

/// Путь хранилища: из конфигурации или `$XDG_DATA_HOME/ahk-script/store.json`
fn store_path(config: &Config) -> Option<PathBuf> {
    if let Some(path) = &config.store.path {
        return Some(path.clone());
    }

    let data_home = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))?;

    Some(data_home.join("ahk-script").join("store.json"))
}

fn init_tracing(config: &Config, cli_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let directives = cli_level.unwrap_or(if config.logging.filter.is_empty() {
        config.logging.level.as_str()
    } else {
        config.logging.filter.as_str()
    });

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives))?;

    // stdout занят результатами команд, логи идут в stderr
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
