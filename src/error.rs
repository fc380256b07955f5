use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Внешняя утилита не найдена: {0}")]
    ExternalToolNotFound(String),

    #[error("Команда завершилась с кодом {code}: {output}")]
    CommandFailed { code: i32, output: String },

    #[error("Ключ не найден в хранилище: {0}")]
    KeyNotFound(String),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректное регулярное выражение: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Буфер обмена не ответил: {0}")]
    ClipboardTimeout(String),

    #[error("Ошибка сериализации: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl ScriptError {
    pub fn key_not_found<T>(key: impl Into<String>) -> Result<T> {
        Err(ScriptError::KeyNotFound(key.into()))
    }

    /// Код завершения, если ошибка пришла от внешней команды
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ScriptError::CommandFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! script_error {
    (tool_not_found, $($arg:tt)*) => {
        $crate::error::ScriptError::ExternalToolNotFound(format!($($arg)*))
    };
    (clipboard_timeout, $($arg:tt)*) => {
        $crate::error::ScriptError::ClipboardTimeout(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::ScriptError::Internal(format!($($arg)*))
    };
}
