use crate::error::{ScriptError, Result};
use crate::utils::find_program;
use std::process::Command;
use tracing::{debug, warn};

/// Графическая сессия пользователя, запустившего программу через sudo.
///
/// Окружение вычисляется один раз при создании и подставляется каждой
/// графической утилите, запускаемой от имени этого пользователя.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudoSession {
    user: String,
    env: Vec<(String, String)>,
}

impl SudoSession {
    /// Сессия из `SUDO_USER`; `None`, если подмена выключена или sudo не использовался
    pub fn detect(enabled: bool) -> Option<Self> {
        if !enabled {
            return None;
        }

        let user = std::env::var("SUDO_USER").ok().filter(|user| !user.is_empty())?;
        let env = session_env(&user);
        Some(Self { user, env })
    }

    pub fn new(user: impl Into<String>, env: Vec<(String, String)>) -> Self {
        Self {
            user: user.into(),
            env,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// `sudo -E -u <user> <program>` с окружением сессии; аргументы добавляет вызывающий
    pub fn command(&self, program: &str) -> Result<Command> {
        // sudo сам сообщает "command not found" кодом 1, поэтому ищем заранее
        if find_program(program).is_none() {
            return Err(ScriptError::ExternalToolNotFound(program.to_string()));
        }

        let mut cmd = Command::new("sudo");
        cmd.args(["-E", "-u", self.user.as_str(), program]);
        cmd.envs(self.env.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        Ok(cmd)
    }
}

/// Команда для утилиты: через сессию sudo, если она есть, иначе напрямую
pub(crate) fn tool_command(program: &str, session: Option<&SudoSession>) -> Result<Command> {
    match session {
        Some(session) => session.command(program),
        None => Ok(Command::new(program)),
    }
}

fn session_env(user: &str) -> Vec<(String, String)> {
    let mut env = Vec::new();

    match lookup_uid(user) {
        Some(uid) => {
            let runtime_dir = format!("/run/user/{}", uid);
            debug!("Окружение сессии {}: uid={}", user, uid);
            env.push((
                "DBUS_SESSION_BUS_ADDRESS".to_string(),
                format!("unix:path={}/bus", runtime_dir),
            ));
            env.push(("XDG_RUNTIME_DIR".to_string(), runtime_dir));
        }
        None => warn!("Не удалось определить uid пользователя {}", user),
    }

    env.push(("USER".to_string(), user.to_string()));
    if let Ok(display) = std::env::var("DISPLAY") {
        env.push(("DISPLAY".to_string(), display));
    }

    env
}

fn lookup_uid(user: &str) -> Option<u32> {
    let output = Command::new("id").args(["-u", user]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()?.trim().parse().ok()
}
