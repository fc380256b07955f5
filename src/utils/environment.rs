use crate::config::Config;
use std::path::PathBuf;
use tracing::{info, warn};

/// Результат проверки одной утилиты
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub setting: &'static str,
    pub program: String,
    pub resolved: Option<PathBuf>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Проверить окружение: наличие утилит, дисплея и пользователя.
///
/// Отсутствие утилиты только предупреждение: скрипт может не использовать
/// соответствующий компонент.
pub fn check_environment(config: &Config) -> Vec<ToolStatus> {
    info!("Проверка окружения...");

    let statuses: Vec<ToolStatus> = config
        .tools
        .entries()
        .into_iter()
        .map(|(setting, program)| {
            let resolved = find_program(program);
            match &resolved {
                Some(path) => info!("tools.{}: {} -> {}", setting, program, path.display()),
                None => warn!("tools.{}: утилита '{}' не найдена в PATH", setting, program),
            }
            ToolStatus {
                setting,
                program: program.to_string(),
                resolved,
            }
        })
        .collect();

    check_display();
    check_not_root();

    info!("Проверка окружения завершена");
    statuses
}

/// Найти исполняемый файл: путь со `/` проверяется как есть, голое имя ищется по PATH
pub fn find_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

fn check_display() {
    let x11 = std::env::var_os("DISPLAY").is_some();
    let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();

    if !x11 && !wayland {
        warn!("Не задан DISPLAY/WAYLAND_DISPLAY: диалоги, окна и буфер обмена работать не будут");
    } else if !x11 {
        warn!("Сессия Wayland без DISPLAY: wmctrl, xdotool и xclip требуют XWayland");
    }
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Приложение запущено от имени root!");
            match std::env::var("SUDO_USER") {
                Ok(sudo_user) => warn!(
                    "   Утилиты будут запускаться от имени {} (tools.run_as_sudo_user)",
                    sudo_user
                ),
                Err(_) => warn!("   Графические утилиты могут не получить доступ к сессии"),
            }
        }
        Ok(user) => {
            info!("Приложение запущено от имени пользователя: {}", user);
        }
        Err(_) => {
            warn!("Не удалось определить пользователя");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_program_absolute() {
        assert!(find_program("/bin/sh").is_some());
        assert_eq!(find_program("/definitely/not/here"), None);
    }

    #[test]
    fn test_find_program_in_path() {
        assert!(find_program("sh").is_some());
        assert!(find_program("ahk-script-no-such-tool").is_none());
    }

    #[test]
    fn test_check_environment_reports_every_tool() {
        let mut config = Config::default();
        config.tools.dialog = "ahk-script-no-such-tool".to_string();

        let statuses = check_environment(&config);
        assert_eq!(statuses.len(), 5);

        let dialog = statuses.iter().find(|s| s.setting == "dialog").unwrap();
        assert!(!dialog.is_available());

        let shell = statuses.iter().find(|s| s.setting == "shell").unwrap();
        assert!(shell.is_available());
    }
}
