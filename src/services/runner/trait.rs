use crate::config::ToolsConfig;
use crate::error::Result;
use crate::events::ToolOutput;
use std::sync::Arc;

/// Запуск внешней утилиты с ожиданием завершения и захватом stdout
pub trait ToolRunner: Send + Sync {
    /// Запустить `program` с аргументами, дождаться выхода.
    ///
    /// Ненулевой код не ошибка, он возвращается в `ToolOutput`. Ошибкой
    /// считается только невозможность запустить программу.
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput>;

    /// То же, но всегда от текущего пользователя процесса, без сессии sudo.
    /// Для оболочки: команды скрипта не должны менять пользователя.
    fn run_as_invoker(&self, program: &str, args: &[String]) -> Result<ToolOutput> {
        self.run(program, args)
    }
}

/// Factory function to create an appropriate tool runner based on the dry_run flag
pub fn create_tool_runner(tools: &ToolsConfig, dry_run: bool) -> Arc<dyn ToolRunner> {
    if dry_run {
        Arc::new(super::dry_run::DryRunRunner::new())
    } else {
        Arc::new(super::process::ProcessRunner::new(tools.run_as_sudo_user))
    }
}
