use crate::debug_if_enabled;
use crate::error::{ScriptError, Result};
use crate::services::ToolRunner;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Запуск команд оболочки и создание файлов
pub struct System {
    shell: String,
    runner: Arc<dyn ToolRunner>,
}

impl System {
    pub fn new(shell: &str, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            shell: shell.to_string(),
            runner,
        }
    }

    /// Выполнить строку через `<shell> -c` и вернуть stdout без завершающего `\n`.
    ///
    /// Строка передаётся оболочке как есть, без экранирования. Оболочка
    /// запускается от текущего пользователя, как и `create_file`.
    pub fn exec_command(&self, command: &str) -> Result<String> {
        debug_if_enabled!("exec_command: {}", command);

        let args = vec!["-c".to_string(), command.to_string()];
        let output = self.runner.run_as_invoker(&self.shell, &args)?;

        if !output.success() {
            warn!("Команда '{}' завершилась с кодом {}", command, output.code);
            return Err(ScriptError::CommandFailed {
                code: output.code,
                output: output.output,
            });
        }

        Ok(output.output)
    }

    /// Создать или перезаписать файл; содержимое пишется без добавления `\n`
    pub fn create_file<P: AsRef<Path>>(&self, path: P, contents: Option<&str>) -> Result<()> {
        let path = path.as_ref();
        debug_if_enabled!("create_file: {:?}", path);
        std::fs::write(path, contents.unwrap_or(""))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::runner::recording::RecordingRunner;
    use crate::services::runner::{ProcessRunner, SudoSession};

    fn system() -> System {
        System::new("/bin/sh", Arc::new(ProcessRunner::new(false)))
    }

    #[test]
    fn echo_returns_output_without_newline() {
        assert_eq!(system().exec_command("echo hello").unwrap(), "hello");
    }

    #[test]
    fn non_zero_exit_raises_command_failed() {
        let err = system().exec_command("echo oops; exit 7").unwrap_err();
        match err {
            ScriptError::CommandFailed { code, output } => {
                assert_eq!(code, 7);
                assert_eq!(output, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(system().exec_command("exit 7").unwrap_err().exit_code(), Some(7));
    }

    #[test]
    fn missing_shell_is_tool_not_found() {
        let system = System::new("ahk-script-no-such-shell", Arc::new(ProcessRunner::new(false)));
        assert!(matches!(
            system.exec_command("echo hello"),
            Err(ScriptError::ExternalToolNotFound(p)) if p == "ahk-script-no-such-shell"
        ));
    }

    #[test]
    fn shell_never_goes_through_sudo_session() {
        let runner = Arc::new(RecordingRunner::new());
        let system = System::new("/bin/sh", runner.clone());
        system.exec_command("true").unwrap();
        assert_eq!(runner.invoker_calls(), vec![vec!["/bin/sh", "-c", "true"]]);

        // Даже при активной сессии sudo оболочка запускается напрямую
        let runner = ProcessRunner::with_session(Some(SudoSession::new(
            "ahk-script-no-such-user",
            Vec::new(),
        )));
        let system = System::new("/bin/sh", Arc::new(runner));
        assert_eq!(system.exec_command("echo direct").unwrap(), "direct");
    }

    #[test]
    fn create_file_writes_exact_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        system().create_file(&path, Some("abc")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc");

        // Повторный вызов обрезает файл
        system().create_file(&path, None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn create_file_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(matches!(
            system().create_file(&path, Some("x")),
            Err(ScriptError::Io(_))
        ));
    }
}
