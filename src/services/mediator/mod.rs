//! Mediator: граница с хостом автоматизации
//!
//! Модуль отвечает ТОЛЬКО за доставку синтетического ввода и чтение заголовка
//! активного окна. Логика скриптового API (повторы, ожидания, таймауты)
//! находится в `scripting`.

mod dry_run;
mod xdotool;
mod r#trait;

pub use self::dry_run::DryRunMediator;
pub use self::r#trait::{create_mediator, Mediator};
pub use self::xdotool::XdotoolMediator;
