use crate::config::ToolsConfig;
use crate::error::Result;
use crate::services::runner::SudoSession;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Один из двух независимых текстовых буферов X11
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Buffer {
    Clipboard,
    PrimarySelection,
}

impl Buffer {
    /// Имя буфера в терминах `xclip -selection`
    pub fn selection_name(&self) -> &'static str {
        match self {
            Buffer::Clipboard => "clipboard",
            Buffer::PrimarySelection => "primary",
        }
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selection_name())
    }
}

/// Обработчик ответа на запрос текста
pub type TextCallback = Box<dyn FnOnce(Result<String>) + Send + 'static>;

/// Буфер обмена с асинхронным чтением в стиле "запрос сейчас, ответ в колбэке"
pub trait ClipboardBackend: Send + Sync {
    /// Записать текст (UTF-8) в буфер синхронно
    fn set_text(&self, buffer: Buffer, text: &str) -> Result<()>;

    /// Запросить текст; `callback` вызывается позже, возможно из другого потока
    fn request_text(&self, buffer: Buffer, callback: TextCallback);
}

/// Factory function to create an appropriate clipboard backend based on the dry_run flag
pub fn create_clipboard_backend(
    tools: &ToolsConfig,
    runtime: Handle,
    dry_run: bool,
) -> Arc<dyn ClipboardBackend> {
    if dry_run {
        Arc::new(super::dry_run::DryRunClipboard::new())
    } else {
        let session = SudoSession::detect(tools.run_as_sudo_user);
        Arc::new(super::xclip::XclipBackend::new(&tools.clipboard, session, runtime))
    }
}
