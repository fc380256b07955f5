pub mod clipboard_backend;
pub mod mediator;
pub mod runner;

pub use clipboard_backend::{create_clipboard_backend, Buffer, ClipboardBackend};
pub use mediator::{create_mediator, Mediator};
pub use runner::{create_tool_runner, ToolRunner};
