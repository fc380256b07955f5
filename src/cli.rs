use ahk_script::error::Result;
use ahk_script::{Geometry, ScriptApi, ToolOutput};
use clap::Subcommand;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Отправить последовательность клавиш (поддерживает `<enter>` и т.п.)
    SendKeys { text: String },

    /// Отправить одну клавишу несколько раз
    SendKey {
        key: String,
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        repeat: i64,
    },

    /// Постоянное хранилище значений
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },

    /// Показать диалог
    Dialog {
        #[command(subcommand)]
        kind: DialogKind,
    },

    /// Выполнить команду оболочки
    Exec { command: String },

    /// Создать или перезаписать файл
    CreateFile {
        path: PathBuf,
        contents: Option<String>,
    },

    /// Буфер обмена
    Clipboard {
        #[command(subcommand)]
        action: BufferAction,
    },

    /// Первичное выделение X11
    Selection {
        #[command(subcommand)]
        action: BufferAction,
    },

    /// Управление окнами
    Window {
        #[command(subcommand)]
        action: WindowAction,
    },

    /// Проверить наличие утилит и дисплея
    Check,
}

#[derive(Subcommand, Debug)]
pub enum StoreAction {
    /// Значение разбирается как JSON, иначе сохраняется строкой
    Set { key: String, value: String },
    Get { key: String },
    Remove { key: String },
    List,
}

#[derive(Subcommand, Debug)]
pub enum DialogKind {
    Input {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        default: Option<String>,
    },
    Password {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    List {
        #[arg(required = true)]
        options: Vec<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        default: Option<String>,
    },
    ListMulti {
        #[arg(required = true)]
        options: Vec<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long = "default")]
        defaults: Vec<String>,
    },
    OpenFile {
        #[arg(long)]
        title: Option<String>,
    },
    SaveFile {
        #[arg(long)]
        title: Option<String>,
    },
    ChooseDirectory {
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum BufferAction {
    Get,
    Fill,
}

#[derive(Subcommand, Debug)]
pub enum WindowAction {
    WaitFocus {
        title: String,
        /// Таймаут в секундах
        #[arg(long, value_parser = parse_timeout, allow_hyphen_values = true)]
        timeout: Option<Duration>,
    },
    WaitExist {
        title: String,
        #[arg(long, value_parser = parse_timeout, allow_hyphen_values = true)]
        timeout: Option<Duration>,
    },
    Activate {
        title: String,
        #[arg(long)]
        switch_desktop: bool,
    },
    Close {
        title: String,
    },
    ResizeMove {
        title: String,
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        y: i32,
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        width: i32,
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        height: i32,
    },
    MoveToDesktop {
        title: String,
        desk: i32,
    },
    SwitchDesktop {
        desk: i32,
    },
    SetProperty {
        title: String,
        action: String,
        prop: String,
    },
}

/// Что напечатать после выполнения команды
#[derive(Debug)]
pub enum Outcome {
    Nothing,
    Text(String),
    Tool(ToolOutput),
    Flag(bool),
    Lines(Vec<String>),
    /// Хранилище изменено, хост должен его сохранить
    StoreChanged,
}

impl Command {
    /// Команда не требует скриптового API
    pub fn is_check(&self) -> bool {
        matches!(self, Command::Check)
    }
}

/// Секунды в `Duration`; отрицательные значения означают ноль
fn parse_timeout(value: &str) -> std::result::Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|e| format!("не число: {}", e))?;
    if seconds.is_nan() {
        return Err("не число: NaN".to_string());
    }
    Duration::try_from_secs_f64(seconds.max(0.0))
        .map_err(|_| format!("слишком большой таймаут: {}", value))
}

fn read_stdin() -> Result<String> {
    use std::io::Read;

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Выполнить команду через скриптовый API. Блокирующая функция.
pub fn execute(api: &ScriptApi, command: Command, dry_run: bool) -> Result<Outcome> {
    let outcome = match command {
        Command::SendKeys { text } => {
            api.keyboard.send_keys(&text)?;
            Outcome::Nothing
        }
        Command::SendKey { key, repeat } => {
            api.keyboard.send_key(&key, Some(repeat))?;
            Outcome::Nothing
        }

        Command::Store { action } => match action {
            StoreAction::Set { key, value } => {
                let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
                api.store.set_value(key, value);
                Outcome::StoreChanged
            }
            StoreAction::Get { key } => {
                Outcome::Text(serde_json::to_string(&api.store.get_value(&key)?)?)
            }
            StoreAction::Remove { key } => {
                api.store.remove_value(&key)?;
                Outcome::StoreChanged
            }
            StoreAction::List => Outcome::Lines(
                api.store
                    .snapshot()
                    .into_iter()
                    .map(|(key, value)| format!("{}\t{}", key, value))
                    .collect(),
            ),
        },

        Command::Dialog { kind } => {
            let result = match kind {
                DialogKind::Input { title, message, default } => api.dialog.input_dialog(
                    title.as_deref(),
                    message.as_deref(),
                    default.as_deref(),
                )?,
                DialogKind::Password { title, message } => {
                    api.dialog.password_dialog(title.as_deref(), message.as_deref())?
                }
                DialogKind::List { options, title, message, default } => api.dialog.list_menu(
                    &options,
                    title.as_deref(),
                    message.as_deref(),
                    default.as_deref(),
                )?,
                DialogKind::ListMulti { options, title, message, defaults } => {
                    let choice = api.dialog.list_menu_multi(
                        &options,
                        title.as_deref(),
                        message.as_deref(),
                        &defaults,
                    )?;
                    return Ok(Outcome::Tool(ToolOutput::new(choice.code, choice.choices.join("\n"))));
                }
                DialogKind::OpenFile { title } => api.dialog.open_file(title.as_deref())?,
                DialogKind::SaveFile { title } => api.dialog.save_file(title.as_deref())?,
                DialogKind::ChooseDirectory { title } => {
                    api.dialog.choose_directory(title.as_deref())?
                }
            };
            Outcome::Tool(ToolOutput::new(result.code, result.output))
        }

        Command::Exec { command } => Outcome::Text(api.system.exec_command(&command)?),
        Command::CreateFile { path, contents } => {
            if dry_run {
                info!("[DRY RUN] create_file {:?}", path);
            } else {
                api.system.create_file(&path, contents.as_deref())?;
            }
            Outcome::Nothing
        }

        Command::Clipboard { action } => match action {
            BufferAction::Get => Outcome::Text(api.clipboard.get_clipboard()?),
            BufferAction::Fill => {
                api.clipboard.fill_clipboard(&read_stdin()?)?;
                Outcome::Nothing
            }
        },
        Command::Selection { action } => match action {
            BufferAction::Get => Outcome::Text(api.clipboard.get_selection()?),
            BufferAction::Fill => {
                api.clipboard.fill_selection(&read_stdin()?)?;
                Outcome::Nothing
            }
        },

        Command::Window { action } => match action {
            WindowAction::WaitFocus { title, timeout } => {
                Outcome::Flag(api.window.wait_for_focus(&title, timeout)?)
            }
            WindowAction::WaitExist { title, timeout } => {
                Outcome::Flag(api.window.wait_for_exist(&title, timeout)?)
            }
            WindowAction::Activate { title, switch_desktop } => {
                Outcome::Tool(api.window.activate(title, switch_desktop)?)
            }
            WindowAction::Close { title } => Outcome::Tool(api.window.close(title)?),
            WindowAction::ResizeMove { title, x, y, width, height } => Outcome::Tool(
                api.window
                    .resize_move(title, Geometry { x, y, width, height })?,
            ),
            WindowAction::MoveToDesktop { title, desk } => {
                Outcome::Tool(api.window.move_to_desktop(title, desk)?)
            }
            WindowAction::SwitchDesktop { desk } => Outcome::Tool(api.window.switch_desktop(desk)?),
            WindowAction::SetProperty { title, action, prop } => {
                Outcome::Tool(api.window.set_property(title, action, prop)?)
            }
        },

        Command::Check => Outcome::Nothing,
    };

    Ok(outcome)
}
