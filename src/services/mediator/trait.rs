use crate::config::ToolsConfig;
use crate::error::Result;
use crate::services::runner::ToolRunner;
use std::sync::Arc;

/// Мост к хосту автоматизации: синтез ввода и заголовок активного окна.
///
/// Ввод накапливается до `flush`; имена клавиш передаются как есть, словарь
/// специальных токенов определяет реализация.
pub trait Mediator: Send + Sync {
    /// Поставить строку в очередь ввода (может содержать токены `<enter>`)
    fn send_string(&self, text: &str) -> Result<()>;
    /// Поставить в очередь одиночную клавишу
    fn send_key(&self, key: &str) -> Result<()>;
    /// Доставить накопленный ввод в окно с фокусом
    fn flush(&self) -> Result<()>;
    /// Заголовок активного окна, пустая строка если окна нет
    fn get_window_title(&self) -> Result<String>;
}

/// Factory function to create an appropriate mediator based on the dry_run flag
pub fn create_mediator(
    tools: &ToolsConfig,
    runner: Arc<dyn ToolRunner>,
    dry_run: bool,
) -> Arc<dyn Mediator> {
    if dry_run {
        Arc::new(super::dry_run::DryRunMediator::new())
    } else {
        Arc::new(super::xdotool::XdotoolMediator::new(&tools.xdotool, runner))
    }
}
