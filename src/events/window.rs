use serde::{Deserialize, Serialize};
use std::fmt;

/// Специальный заголовок: текущее активное окно
pub const ACTIVE_WINDOW: &str = ":ACTIVE:";
/// Специальный заголовок: пользователь выбирает окно щелчком
pub const SELECT_WINDOW: &str = ":SELECT:";

/// Запрос окна по заголовку. Окно не кэшируется и заново ищется утилитой
/// при каждом вызове.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowTarget {
    Active,
    Select,
    /// Подстрока заголовка без учёта регистра
    Title(String),
}

impl WindowTarget {
    pub fn as_arg(&self) -> &str {
        match self {
            WindowTarget::Active => ACTIVE_WINDOW,
            WindowTarget::Select => SELECT_WINDOW,
            WindowTarget::Title(title) => title,
        }
    }
}

impl From<&str> for WindowTarget {
    fn from(title: &str) -> Self {
        match title {
            ACTIVE_WINDOW => WindowTarget::Active,
            SELECT_WINDOW => WindowTarget::Select,
            other => WindowTarget::Title(other.to_string()),
        }
    }
}

impl From<String> for WindowTarget {
    fn from(title: String) -> Self {
        WindowTarget::from(title.as_str())
    }
}

impl fmt::Display for WindowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowTarget::Title(title) => write!(f, "\"{}\"", title),
            other => write!(f, "{}", other.as_arg()),
        }
    }
}

/// Поле заголовка в строке списка окон `wmctrl -l`.
///
/// Строка режется по одиночным пробелам максимум на 5 полей, заголовком
/// считается последнее. Двойной пробел после идентификатора даёт пустое поле,
/// поэтому для обычного вывода wmctrl заголовок приходит целиком.
pub fn title_field(line: &str) -> &str {
    line.splitn(5, ' ').last().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_sentinels() {
        assert_eq!(WindowTarget::from(":ACTIVE:"), WindowTarget::Active);
        assert_eq!(WindowTarget::from(":SELECT:"), WindowTarget::Select);
        assert_eq!(
            WindowTarget::from("Firefox"),
            WindowTarget::Title("Firefox".to_string())
        );
        assert_eq!(WindowTarget::Active.as_arg(), ":ACTIVE:");
        assert_eq!(WindowTarget::from("gedit").as_arg(), "gedit");
    }

    #[test]
    fn test_title_field_wmctrl_layout() {
        assert_eq!(
            title_field("0x03a00003  0 myhost Terminal - bash"),
            "Terminal - bash"
        );
        assert_eq!(title_field("0x01e00003 -1 myhost Desktop"), "Desktop");
        assert_eq!(title_field(""), "");
    }

    #[test]
    fn test_title_field_keeps_fifth_segment_only() {
        // Без двойного пробела заголовок из нескольких слов обрезается
        assert_eq!(title_field("0x01e00003 -1 myhost My Window"), "Window");
    }
}
