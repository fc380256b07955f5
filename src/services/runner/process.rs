use crate::debug_if_enabled;
use crate::error::{ScriptError, Result};
use crate::events::ToolOutput;
use std::io::ErrorKind;
use std::process::{Command, ExitStatus, Stdio};
use tracing::info;

use super::r#trait::ToolRunner;
use super::session::{tool_command, SudoSession};

/// Синхронный запуск утилит через std::process
pub struct ProcessRunner {
    session: Option<SudoSession>,
}

/// Код завершения; процесс, убитый сигналом, получает отрицательный номер сигнала
pub(crate) fn exit_code(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .unwrap_or_else(|| -status.signal().unwrap_or(0))
}

/// Ошибка запуска: отсутствующая программа отличается от прочих ошибок ввода-вывода
pub(crate) fn spawn_error(program: &str, e: std::io::Error) -> ScriptError {
    match e.kind() {
        ErrorKind::NotFound => ScriptError::ExternalToolNotFound(program.to_string()),
        _ => ScriptError::Io(e),
    }
}

impl ProcessRunner {
    pub fn new(run_as_sudo_user: bool) -> Self {
        Self::with_session(SudoSession::detect(run_as_sudo_user))
    }

    pub fn with_session(session: Option<SudoSession>) -> Self {
        if let Some(session) = &session {
            info!("Утилиты будут запускаться от имени {}", session.user());
        }
        Self { session }
    }

    fn create_command(&self, program: &str, args: &[String], as_invoker: bool) -> Result<Command> {
        let session = if as_invoker { None } else { self.session.as_ref() };

        let mut cmd = tool_command(program, session)?;
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        Ok(cmd)
    }

    fn execute(&self, program: &str, mut cmd: Command) -> Result<ToolOutput> {
        let output = cmd.output().map_err(|e| spawn_error(program, e))?;
        let result = ToolOutput::from_raw(exit_code(&output.status), &output.stdout);

        if !output.stderr.is_empty() {
            debug_if_enabled!("{} stderr: {}", program, String::from_utf8_lossy(&output.stderr).trim());
        }
        debug_if_enabled!("{} завершилась с кодом {}", program, result.code);

        Ok(result)
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput> {
        debug_if_enabled!("Запуск утилиты: {} {:?}", program, args);
        self.execute(program, self.create_command(program, args, false)?)
    }

    fn run_as_invoker(&self, program: &str, args: &[String]) -> Result<ToolOutput> {
        debug_if_enabled!("Запуск от текущего пользователя: {} {:?}", program, args);
        self.execute(program, self.create_command(program, args, true)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn captures_stdout_without_trailing_newline() {
        let runner = ProcessRunner::new(false);
        let output = runner.run("/bin/sh", &args(&["-c", "echo hello"])).unwrap();
        assert_eq!(output, ToolOutput::new(0, "hello"));
    }

    #[test]
    fn non_zero_exit_is_not_an_error() {
        let runner = ProcessRunner::new(false);
        let output = runner.run("/bin/sh", &args(&["-c", "echo partial; exit 3"])).unwrap();
        assert_eq!(output.code, 3);
        assert_eq!(output.output, "partial");
    }

    #[test]
    fn missing_program_is_tool_not_found() {
        let runner = ProcessRunner::new(false);
        let err = runner.run("ahk-script-no-such-tool", &[]).unwrap_err();
        assert!(matches!(err, ScriptError::ExternalToolNotFound(p) if p == "ahk-script-no-such-tool"));
    }

    #[test]
    fn killed_process_reports_negative_signal() {
        let runner = ProcessRunner::new(false);
        let output = runner.run("/bin/sh", &args(&["-c", "kill -9 $$"])).unwrap();
        assert_eq!(output.code, -9);
    }

    #[test]
    fn invoker_commands_skip_sudo_session() {
        let runner = ProcessRunner::with_session(Some(SudoSession::new("nobody", Vec::new())));
        let shell_args = args(&["-c", "touch /tmp/x"]);

        let cmd = runner.create_command("/bin/sh", &shell_args, true).unwrap();
        assert_eq!(cmd.get_program(), "/bin/sh");
        assert_eq!(cmd.get_args().collect::<Vec<_>>(), ["-c", "touch /tmp/x"]);

        let cmd = runner.create_command("/bin/sh", &shell_args, false).unwrap();
        assert_eq!(cmd.get_program(), "sudo");
    }
}
