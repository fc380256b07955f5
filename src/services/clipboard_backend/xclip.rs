use crate::debug_if_enabled;
use crate::error::{ScriptError, Result};
use crate::services::runner::{exit_code, spawn_error, tool_command, SudoSession};
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tokio::runtime::Handle;
use tracing::{debug, error};

use super::r#trait::{Buffer, ClipboardBackend, TextCallback};

/// Буфер обмена через xclip. Чтение выполняется задачей на рантайме tokio,
/// результат приходит в колбэк из рабочего потока рантайма.
pub struct XclipBackend {
    program: String,
    session: Option<SudoSession>,
    runtime: Handle,
}

fn xclip_command(
    program: &str,
    session: Option<&SudoSession>,
    buffer: Buffer,
    mode: &str,
) -> Result<Command> {
    let mut cmd = tool_command(program, session)?;
    cmd.args(["-selection", buffer.selection_name(), mode]);
    Ok(cmd)
}

/// Ответ `xclip -o`. Пустой буфер xclip отличает только текстом в stderr
/// ("target STRING not available"), остальные ненулевые коды это отказ.
fn read_result(program: &str, buffer: Buffer, output: Output) -> Result<String> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let code = exit_code(&output.status);
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if stderr.contains("not available") {
        debug!("{} пуст: {}", buffer, stderr);
        return Ok(String::new());
    }

    error!("{} -o для {} вернул код {}: {}", program, buffer, code, stderr);
    Err(ScriptError::CommandFailed { code, output: stderr })
}

impl XclipBackend {
    pub fn new(program: &str, session: Option<SudoSession>, runtime: Handle) -> Self {
        Self {
            program: program.to_string(),
            session,
            runtime,
        }
    }
}

impl ClipboardBackend for XclipBackend {
    fn set_text(&self, buffer: Buffer, text: &str) -> Result<()> {
        debug_if_enabled!("Запись {} байт в {}", text.len(), buffer);

        let mut child = xclip_command(&self.program, self.session.as_ref(), buffer, "-i")?
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(&self.program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        // xclip форкается и держит буфер в фоне, родитель выходит сразу
        let status = child.wait()?;
        if !status.success() {
            return Err(ScriptError::Internal(format!(
                "{} не смог записать {}: код {}",
                self.program,
                buffer,
                exit_code(&status)
            )));
        }

        Ok(())
    }

    fn request_text(&self, buffer: Buffer, callback: TextCallback) {
        let program = self.program.clone();
        let session = self.session.clone();

        self.runtime.spawn(async move {
            let cmd = match xclip_command(&program, session.as_ref(), buffer, "-o") {
                Ok(cmd) => cmd,
                Err(e) => {
                    callback(Err(e));
                    return;
                }
            };

            let mut cmd = tokio::process::Command::from(cmd);
            cmd.stdin(Stdio::null());
            let result = cmd.output().await;

            let text = match result {
                Ok(output) => read_result(&program, buffer, output),
                Err(e) => {
                    error!("Не удалось запустить {}: {}", program, e);
                    Err(spawn_error(&program, e))
                }
            };

            callback(text);
        });
    }
}
