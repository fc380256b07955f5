//! Scripting API: фасады, доступные пользовательским скриптам
//!
//! Компоненты не зависят друг от друга. Каждый работает либо через внешнюю
//! утилиту (`ToolRunner`), либо через медиатор хоста, либо через бэкенд
//! буфера обмена.

pub mod clipboard;
pub mod dialog;
pub mod keyboard;
pub mod store;
pub mod system;
pub mod window;

pub use clipboard::Clipboard;
pub use dialog::{Dialog, DialogResult, MultiChoice};
pub use keyboard::Keyboard;
pub use store::Store;
pub use system::System;
pub use window::{Geometry, PropertyAction, Window, WindowProperty};

use crate::config::Config;
use crate::services::{ClipboardBackend, Mediator, ToolRunner};
use std::sync::Arc;
use tracing::info;

/// Набор компонентов, который получает скрипт
pub struct ScriptApi {
    pub keyboard: Keyboard,
    pub store: Arc<Store>,
    pub dialog: Dialog,
    pub system: System,
    pub clipboard: Clipboard,
    pub window: Window,
}

impl ScriptApi {
    pub fn new(
        config: &Config,
        mediator: Arc<dyn Mediator>,
        runner: Arc<dyn ToolRunner>,
        clipboard_backend: Arc<dyn ClipboardBackend>,
        store: Arc<Store>,
    ) -> Self {
        info!("Инициализация ScriptApi");

        Self {
            keyboard: Keyboard::new(Arc::clone(&mediator)),
            store,
            dialog: Dialog::new(&config.tools.dialog, Arc::clone(&runner)),
            system: System::new(&config.tools.shell, Arc::clone(&runner)),
            clipboard: Clipboard::new(clipboard_backend, config.clipboard.read_timeout()),
            window: Window::new(
                mediator,
                runner,
                &config.tools.window,
                config.window.poll_interval(),
                config.window.default_timeout(),
            ),
        }
    }
}
