//! Скриптовый API для автоматизации рабочего стола.
//!
//! Шесть независимых компонентов (`Keyboard`, `Store`, `Dialog`, `System`,
//! `Clipboard`, `Window`) поверх внешних утилит и медиатора хоста.

pub mod config;
pub mod error;
pub mod events;
pub mod mappings;
pub mod scripting;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{Result, ScriptError};
pub use events::{ToolOutput, WindowTarget};
pub use scripting::{
    Clipboard, Dialog, DialogResult, Geometry, Keyboard, MultiChoice, PropertyAction, ScriptApi,
    Store, System, Window, WindowProperty,
};
