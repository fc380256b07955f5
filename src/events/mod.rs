pub mod keyboard;
pub mod window;

pub use keyboard::KeyInput;
pub use window::{title_field, WindowTarget, ACTIVE_WINDOW, SELECT_WINDOW};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Результат запуска внешней утилиты: код завершения и stdout без
/// завершающего перевода строки
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub code: i32,
    pub output: String,
}

impl ToolOutput {
    pub fn new(code: i32, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Собрать из сырого stdout, отбросив один завершающий `\n`
    pub fn from_raw(code: i32, stdout: &[u8]) -> Self {
        let text = String::from_utf8_lossy(stdout);
        let trimmed = text.strip_suffix('\n').unwrap_or(&text);
        Self::new(code, trimmed)
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.code, self.output)
    }
}
