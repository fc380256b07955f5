use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub tools: ToolsConfig,
    pub window: WindowConfig,
    pub clipboard: ClipboardConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub filter: String,
}

/// Внешние утилиты, через которые работают компоненты
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub dialog: String,
    pub window: String,
    pub shell: String,
    pub xdotool: String,
    pub clipboard: String,
    /// Под sudo запускать утилиты с окружением исходного пользователя
    pub run_as_sudo_user: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub poll_interval_ms: u64,
    pub default_timeout_secs: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// None - ждать ответа буфера обмена бесконечно
    pub read_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            filter: "ahk_script=info".to_string(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            dialog: "zenity".to_string(),
            window: "wmctrl".to_string(),
            shell: "/bin/sh".to_string(),
            xdotool: "xdotool".to_string(),
            clipboard: "xclip".to_string(),
            run_as_sudo_user: true,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 300,
            default_timeout_secs: 5.0,
        }
    }
}

impl WindowConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn default_timeout(&self) -> Duration {
        // validate() отсекает значения, не представимые в Duration
        Duration::try_from_secs_f64(self.default_timeout_secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl ClipboardConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        // Отсутствующий файл не ошибка: Toml::file молча пропускает его
        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("AHK_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация утилит
        for (name, value) in self.tools.entries() {
            if value.trim().is_empty() {
                anyhow::bail!("Не указана утилита tools.{}", name);
            }
        }

        // Валидация настроек окон
        if self.window.poll_interval_ms < 10 {
            anyhow::bail!("poll_interval_ms должно быть минимум 10");
        }

        let timeout = self.window.default_timeout_secs;
        if timeout < 0.0 || Duration::try_from_secs_f64(timeout).is_err() {
            anyhow::bail!(
                "default_timeout_secs должно быть неотрицательным числом: {}",
                self.window.default_timeout_secs
            );
        }

        if self.clipboard.read_timeout_ms == Some(0) {
            anyhow::bail!("read_timeout_ms должно быть больше 0");
        }

        Ok(())
    }
}

impl ToolsConfig {
    /// Пары (имя настройки, программа) для проверки окружения
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("dialog", self.dialog.as_str()),
            ("window", self.window.as_str()),
            ("shell", self.shell.as_str()),
            ("xdotool", self.xdotool.as_str()),
            ("clipboard", self.clipboard.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.poll_interval(), Duration::from_millis(300));
        assert_eq!(config.window.default_timeout(), Duration::from_secs(5));
        assert_eq!(config.clipboard.read_timeout(), None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[tools]\ndialog = \"/usr/bin/zenity\"\n\n[clipboard]\nread_timeout_ms = 1500"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.tools.dialog, "/usr/bin/zenity");
        assert_eq!(config.tools.window, "wmctrl");
        assert_eq!(config.clipboard.read_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.tools.shell, "/bin/sh");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.window.poll_interval_ms = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tools.window = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.clipboard.read_timeout_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unrepresentable_default_timeout_rejected() {
        for secs in [f64::INFINITY, 1e30, f64::NAN, -1.0] {
            let mut config = Config::default();
            config.window.default_timeout_secs = secs;
            assert!(config.validate().is_err(), "{} должно отклоняться", secs);
        }

        let mut config = Config::default();
        config.window.default_timeout_secs = 0.5;
        assert!(config.validate().is_ok());
        assert_eq!(config.window.default_timeout(), Duration::from_millis(500));
    }
}
